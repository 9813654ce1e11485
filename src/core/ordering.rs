//! Display-only sort state over the purchase list.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::domain::Purchase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    Installments,
    Category,
    StartDate,
    EndDate,
}

impl SortField {
    fn compare(&self, a: &Purchase, b: &Purchase) -> Ordering {
        match self {
            SortField::Name => compare_text(&a.name, &b.name),
            SortField::Category => compare_text(&a.category, &b.category),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Installments => a.installments.cmp(&b.installments),
            SortField::StartDate => a.start_date.cmp(&b.start_date),
            SortField::EndDate => a.end_date().cmp(&b.end_date()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Installments => "installments",
            SortField::Category => "category",
            SortField::StartDate => "start-date",
            SortField::EndDate => "end-date",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            "installments" => Ok(SortField::Installments),
            "category" => Ok(SortField::Category),
            "start-date" | "start" => Ok(SortField::StartDate),
            "end-date" | "end" => Ok(SortField::EndDate),
            other => Err(format!("unknown sort field `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Tri-state sort per field: ascending, descending, then back to canonical order.
#[derive(Debug, Clone, Default)]
pub struct OrderingController {
    state: Option<SortState>,
}

impl OrderingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<SortState> {
        self.state
    }

    /// Advances the cycle for `field`; a different field restarts at ascending.
    pub fn sort_by(&mut self, field: SortField) -> Option<SortState> {
        self.state = match self.state {
            Some(SortState {
                field: current,
                direction: SortDirection::Ascending,
            }) if current == field => Some(SortState {
                field,
                direction: SortDirection::Descending,
            }),
            Some(SortState {
                field: current,
                direction: SortDirection::Descending,
            }) if current == field => None,
            _ => Some(SortState {
                field,
                direction: SortDirection::Ascending,
            }),
        };
        self.state
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Sorted view of `purchases`; ties keep canonical order in both directions.
    pub fn apply<'a>(&self, purchases: &'a [Purchase]) -> Vec<&'a Purchase> {
        let mut view: Vec<&Purchase> = purchases.iter().collect();
        if let Some(SortState { field, direction }) = self.state {
            view.sort_by(|a, b| {
                let ordering = field.compare(a, b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        view
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
