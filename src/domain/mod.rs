pub mod category;
pub mod month;
pub mod purchase;

pub use category::{CategoryRegistry, CategoryStyle, FALLBACK_COLOR, FALLBACK_ICON};
pub use month::{shift_month, MonthKey};
pub use purchase::{Purchase, PurchaseDraft, PurchaseRef, PurchaseStore, MAX_INSTALLMENTS, MAX_PRICE};
