//! Purchases paid in monthly installments and the store that owns them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::month::shift_month;
use crate::errors::ValidationError;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Longest accepted plan: fifty years of monthly payments.
pub const MAX_INSTALLMENTS: u32 = 600;

/// Largest accepted price. Keeps every sum over the store finite.
pub const MAX_PRICE: f64 = 1.0e12;

/// A purchase recorded by the user. Immutable once admitted into the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub installments: u32,
    pub category: String,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Due date `months` after the start date, saturating at the end of the calendar.
    pub fn installment_date(&self, months: u32) -> NaiveDate {
        i32::try_from(months)
            .ok()
            .and_then(|months| shift_month(self.start_date, months))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Date of the final installment.
    pub fn end_date(&self) -> NaiveDate {
        self.installment_date(self.installments.saturating_sub(1))
    }

    pub fn monthly_payment(&self) -> f64 {
        self.price / self.installments.max(1) as f64
    }

    /// Re-checks the admission bounds on a record that did not come through validation.
    pub fn check_bounds(&self) -> Result<(), ValidationError> {
        check_price(self.price)?;
        check_installments(i64::from(self.installments))?;
        Ok(())
    }
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 || price > MAX_PRICE {
        return Err(ValidationError::InvalidPrice(price.to_string()));
    }
    Ok(())
}

fn check_installments(count: i64) -> Result<u32, ValidationError> {
    u32::try_from(count)
        .ok()
        .filter(|count| (1..=MAX_INSTALLMENTS).contains(count))
        .ok_or_else(|| ValidationError::InvalidInstallments(count.to_string()))
}

/// Unvalidated input for a new purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDraft {
    pub name: String,
    pub price: f64,
    pub installments: i64,
    pub category: String,
    pub start_date: NaiveDate,
}

impl PurchaseDraft {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        installments: i64,
        category: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            installments,
            category: category.into(),
            start_date,
        }
    }

    /// Builds a draft from raw form text, rejecting numbers that do not parse.
    pub fn from_form(
        name: &str,
        price: &str,
        installments: &str,
        category: &str,
        start_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let price_value = price
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidPrice(price.trim().to_string()))?;
        let installment_value = installments
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidInstallments(installments.trim().to_string()))?;
        Ok(Self::new(
            name,
            price_value,
            installment_value,
            category,
            start_date,
        ))
    }

    /// Checks every admission rule and produces the immutable purchase.
    pub fn validate(self) -> Result<Purchase, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        check_price(self.price)?;
        let installments = check_installments(self.installments)?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(Purchase {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: self.price,
            installments,
            category: category.to_string(),
            start_date: self.start_date,
            created_at: Utc::now(),
        })
    }
}

/// Locates a purchase either by identifier or by canonical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseRef {
    Id(Uuid),
    Index(usize),
}

impl From<Uuid> for PurchaseRef {
    fn from(id: Uuid) -> Self {
        PurchaseRef::Id(id)
    }
}

impl From<usize> for PurchaseRef {
    fn from(index: usize) -> Self {
        PurchaseRef::Index(index)
    }
}

/// Canonical, insertion-ordered purchase list; the persisted snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseStore {
    #[serde(default = "PurchaseStore::schema_version_default")]
    pub schema_version: u8,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    purchases: Vec<Purchase>,
}

impl Default for PurchaseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseStore {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            updated_at: Utc::now(),
            purchases: Vec::new(),
        }
    }

    /// Appends an already validated purchase.
    pub fn push(&mut self, purchase: Purchase) -> Uuid {
        let id = purchase.id;
        self.purchases.push(purchase);
        self.touch();
        id
    }

    /// Removes the referenced purchase; absent targets are a no-op.
    pub fn remove(&mut self, target: PurchaseRef) -> Option<Purchase> {
        let position = match target {
            PurchaseRef::Id(id) => self.purchases.iter().position(|p| p.id == id)?,
            PurchaseRef::Index(index) if index < self.purchases.len() => index,
            PurchaseRef::Index(_) => return None,
        };
        let removed = self.purchases.remove(position);
        self.touch();
        Some(removed)
    }

    pub fn all(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn len(&self) -> usize {
        self.purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn validate_rejects_each_missing_field() {
        let cases = [
            (PurchaseDraft::new("  ", 10.0, 1, "Comida", start()), ValidationError::EmptyName),
            (
                PurchaseDraft::new("Tv", 0.0, 1, "Comida", start()),
                ValidationError::InvalidPrice("0".into()),
            ),
            (
                PurchaseDraft::new("Tv", 10.0, 0, "Comida", start()),
                ValidationError::InvalidInstallments("0".into()),
            ),
            (
                PurchaseDraft::new("Tv", 10.0, 2, "", start()),
                ValidationError::MissingCategory,
            ),
        ];
        for (draft, expected) in cases {
            assert_eq!(draft.validate().unwrap_err(), expected);
        }
    }

    #[test]
    fn validate_rejects_non_finite_price() {
        let draft = PurchaseDraft::new("Tv", f64::NAN, 3, "Comida", start());
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn validate_caps_installments_and_price() {
        let draft = |price: f64, count: i64| PurchaseDraft::new("Big", price, count, "Comida", start());
        assert_eq!(draft(100.0, MAX_INSTALLMENTS as i64).validate().unwrap().installments, 600);
        assert_eq!(
            draft(100.0, 601).validate().unwrap_err(),
            ValidationError::InvalidInstallments("601".into())
        );
        assert_eq!(
            draft(100.0, 3_200_000).validate().unwrap_err(),
            ValidationError::InvalidInstallments("3200000".into())
        );
        assert!(draft(100.0, 3_000_000_000).validate().is_err());
        assert!(draft(MAX_PRICE, 1).validate().is_ok());
        assert!(matches!(
            draft(f64::MAX, 1).validate(),
            Err(ValidationError::InvalidPrice(_))
        ));
    }

    #[test]
    fn unchecked_records_saturate_instead_of_wrapping() {
        let mut purchase = PurchaseDraft::new("Big", 100.0, 3, "Comida", start())
            .validate()
            .unwrap();
        purchase.installments = 3_200_000;
        assert_eq!(purchase.end_date(), NaiveDate::MAX);
        assert!(purchase.check_bounds().is_err());
        purchase.installments = u32::MAX;
        assert_eq!(purchase.end_date(), NaiveDate::MAX);
    }

    #[test]
    fn from_form_parses_trimmed_numbers() {
        let draft = PurchaseDraft::from_form("Fridge", " 1200.50 ", "12", "Electrodomésticos", start())
            .expect("parse form");
        assert_eq!(draft.price, 1200.50);
        assert_eq!(draft.installments, 12);
    }

    #[test]
    fn from_form_rejects_garbage() {
        let err = PurchaseDraft::from_form("Fridge", "abc", "12", "Comida", start()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice("abc".into()));
        let err = PurchaseDraft::from_form("Fridge", "10", "1.5", "Comida", start()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidInstallments("1.5".into()));
    }

    #[test]
    fn end_date_uses_calendar_months() {
        let purchase = PurchaseDraft::new("Phone", 300.0, 2, "Comida", start())
            .validate()
            .unwrap();
        assert_eq!(purchase.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(purchase.monthly_payment(), 150.0);
    }

    #[test]
    fn remove_by_index_and_missing_id() {
        let mut store = PurchaseStore::new();
        let first = store.push(
            PurchaseDraft::new("A", 10.0, 1, "Comida", start())
                .validate()
                .unwrap(),
        );
        store.push(
            PurchaseDraft::new("B", 20.0, 1, "Comida", start())
                .validate()
                .unwrap(),
        );
        assert!(store.remove(PurchaseRef::Id(Uuid::new_v4())).is_none());
        assert!(store.remove(PurchaseRef::Index(5)).is_none());
        let removed = store.remove(PurchaseRef::Index(1)).expect("second removed");
        assert_eq!(removed.name, "B");
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].id, first);
    }
}
