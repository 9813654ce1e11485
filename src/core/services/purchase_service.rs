use crate::domain::{Purchase, PurchaseDraft, PurchaseRef, PurchaseStore};

use super::ServiceResult;

pub struct PurchaseService;

impl PurchaseService {
    /// Validates the draft and appends the resulting purchase in canonical order.
    pub fn add(store: &mut PurchaseStore, draft: PurchaseDraft) -> ServiceResult<Purchase> {
        let purchase = draft.validate()?;
        store.push(purchase.clone());
        tracing::debug!(purchase_id = %purchase.id, "purchase appended to store");
        Ok(purchase)
    }

    /// Removes the referenced purchase. Missing targets yield `None` and leave the store untouched.
    pub fn remove(store: &mut PurchaseStore, target: impl Into<PurchaseRef>) -> Option<Purchase> {
        let target = target.into();
        let removed = store.remove(target);
        if removed.is_none() {
            tracing::debug!(?target, "remove ignored, purchase not found");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::errors::ValidationError;
    use chrono::NaiveDate;

    fn draft(name: &str, price: f64) -> PurchaseDraft {
        PurchaseDraft::new(
            name,
            price,
            3,
            "Comida",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut store = PurchaseStore::new();
        PurchaseService::add(&mut store, draft("B", 10.0)).unwrap();
        PurchaseService::add(&mut store, draft("A", 20.0)).unwrap();
        let names: Vec<_> = store
            .all()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn invalid_draft_leaves_store_untouched() {
        let mut store = PurchaseStore::new();
        let err = PurchaseService::add(&mut store, draft("", 10.0)).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(ValidationError::EmptyName)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = PurchaseStore::new();
        let purchase = PurchaseService::add(&mut store, draft("A", 20.0)).unwrap();
        assert!(PurchaseService::remove(&mut store, purchase.id).is_some());
        assert!(PurchaseService::remove(&mut store, purchase.id).is_none());
        assert!(store.is_empty());
    }
}
