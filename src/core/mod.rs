pub mod clock;
pub mod ordering;
pub mod services;
pub mod tracker_manager;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ordering::{OrderingController, SortDirection, SortField, SortState};
pub use tracker_manager::TrackerManager;
