//! Aggregate views over every purchase schedule.
//!
//! All functions here are pure: they take the canonical purchase list, the
//! category registry and a reference date, and rebuild each view from scratch.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{CategoryRegistry, MonthKey, Purchase};

use super::schedule_service::ScheduleService;

/// Number of months the evolution series always covers from the current month.
pub const PROJECTION_MONTHS: usize = 12;

/// One installment landing in a month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthEntry {
    pub purchase_id: Uuid,
    pub purchase_name: String,
    pub amount: f64,
    pub category: String,
    pub installment_index: u32,
    pub installment_count: u32,
}

/// Installments of one category inside a month.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: f64,
    pub entries: Vec<MonthEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthDetail {
    pub total: f64,
    pub event_count: usize,
    pub entries: Vec<MonthEntry>,
    /// Category groups in order of first appearance.
    pub categories: Vec<CategoryBreakdown>,
}

impl MonthDetail {
    fn record(&mut self, entry: MonthEntry) {
        self.total += entry.amount;
        self.event_count += 1;
        match self
            .categories
            .iter_mut()
            .find(|group| group.category == entry.category)
        {
            Some(group) => {
                group.total += entry.amount;
                group.entries.push(entry.clone());
            }
            None => self.categories.push(CategoryBreakdown {
                category: entry.category.clone(),
                total: entry.amount,
                entries: vec![entry.clone()],
            }),
        }
        self.entries.push(entry);
    }

    pub fn category_total(&self, category: &str) -> f64 {
        self.categories
            .iter()
            .find(|group| group.category == category)
            .map_or(0.0, |group| group.total)
    }
}

/// Amount due per month, with the installments behind it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTotals {
    pub months: BTreeMap<MonthKey, MonthDetail>,
}

impl MonthlyTotals {
    pub fn get(&self, month: MonthKey) -> Option<&MonthDetail> {
        self.months.get(&month)
    }

    /// Amount due in `month`; zero when nothing is scheduled.
    pub fn total_for(&self, month: MonthKey) -> f64 {
        self.get(month).map_or(0.0, |detail| detail.total)
    }

    /// Buckets in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, &MonthDetail)> {
        self.months.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    pub percentage: f64,
    pub purchase_count: usize,
}

/// Lifetime debt per category, summing full purchase prices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySummary {
    /// Registry categories first (name order), then unregistered ones by first appearance.
    pub rows: Vec<CategoryShare>,
    pub grand_total: f64,
}

impl CategorySummary {
    pub fn get(&self, category: &str) -> Option<&CategoryShare> {
        self.rows.iter().find(|row| row.category == category)
    }

    pub fn total_for(&self, category: &str) -> f64 {
        self.get(category).map_or(0.0, |row| row.total)
    }
}

/// Amortized amount per month and category, for charting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyEvolution {
    pub categories: Vec<String>,
    /// Every bucket holds every category, zero when untouched.
    pub months: BTreeMap<MonthKey, BTreeMap<String, f64>>,
}

impl MonthlyEvolution {
    pub fn amount(&self, month: MonthKey, category: &str) -> f64 {
        self.months
            .get(&month)
            .and_then(|row| row.get(category))
            .copied()
            .unwrap_or(0.0)
    }

    /// Chronological `(month, amount)` points for one category.
    pub fn series(&self, category: &str) -> Vec<(MonthKey, f64)> {
        self.months
            .iter()
            .map(|(month, row)| (*month, row.get(category).copied().unwrap_or(0.0)))
            .collect()
    }

    /// Chronological per-month totals across categories.
    pub fn month_totals(&self) -> Vec<(MonthKey, f64)> {
        self.months
            .iter()
            .map(|(month, row)| (*month, row.values().sum()))
            .collect()
    }

    pub fn month_keys(&self) -> impl Iterator<Item = &MonthKey> {
        self.months.keys()
    }
}

/// All three views, rebuilt together after each store mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateViews {
    pub monthly: MonthlyTotals,
    pub categories: CategorySummary,
    pub evolution: MonthlyEvolution,
}

pub struct SummaryService;

impl SummaryService {
    pub fn aggregate(
        purchases: &[Purchase],
        registry: &CategoryRegistry,
        today: NaiveDate,
    ) -> AggregateViews {
        AggregateViews {
            monthly: Self::monthly_totals(purchases),
            categories: Self::category_summary(purchases, registry),
            evolution: Self::monthly_evolution(purchases, registry, today),
        }
    }

    pub fn monthly_totals(purchases: &[Purchase]) -> MonthlyTotals {
        let mut months: BTreeMap<MonthKey, MonthDetail> = BTreeMap::new();
        for purchase in purchases {
            for event in ScheduleService::schedule(purchase) {
                months.entry(event.bucket).or_default().record(MonthEntry {
                    purchase_id: purchase.id,
                    purchase_name: purchase.name.clone(),
                    amount: event.amount,
                    category: purchase.category.clone(),
                    installment_index: event.index,
                    installment_count: event.count,
                });
            }
        }
        MonthlyTotals { months }
    }

    pub fn category_summary(purchases: &[Purchase], registry: &CategoryRegistry) -> CategorySummary {
        let categories = Self::known_categories(purchases, registry);
        let mut totals: HashMap<&str, (f64, usize)> = categories
            .iter()
            .map(|name| (name.as_str(), (0.0, 0)))
            .collect();
        for purchase in purchases {
            if let Some(slot) = totals.get_mut(purchase.category.as_str()) {
                slot.0 += purchase.price;
                slot.1 += 1;
            }
        }

        let grand_total: f64 = categories
            .iter()
            .map(|name| totals.get(name.as_str()).map_or(0.0, |slot| slot.0))
            .sum();
        let rows = categories
            .iter()
            .map(|name| {
                let (total, purchase_count) = totals.get(name.as_str()).copied().unwrap_or_default();
                CategoryShare {
                    category: name.clone(),
                    total,
                    percentage: percentage_of(total, grand_total),
                    purchase_count,
                }
            })
            .collect();
        CategorySummary { rows, grand_total }
    }

    pub fn monthly_evolution(
        purchases: &[Purchase],
        registry: &CategoryRegistry,
        today: NaiveDate,
    ) -> MonthlyEvolution {
        let categories = Self::known_categories(purchases, registry);
        let blank_row: BTreeMap<String, f64> =
            categories.iter().map(|name| (name.clone(), 0.0)).collect();

        let mut months: BTreeMap<MonthKey, BTreeMap<String, f64>> = MonthKey::from_date(today)
            .range(PROJECTION_MONTHS)
            .map(|month| (month, blank_row.clone()))
            .collect();

        for purchase in purchases {
            for event in ScheduleService::schedule(purchase) {
                let row = months
                    .entry(event.bucket)
                    .or_insert_with(|| blank_row.clone());
                *row.entry(purchase.category.clone()).or_insert(0.0) += event.amount;
            }
        }

        MonthlyEvolution { categories, months }
    }

    /// Registry categories in name order, followed by unregistered ones seen in purchases.
    fn known_categories(purchases: &[Purchase], registry: &CategoryRegistry) -> Vec<String> {
        let mut categories: Vec<String> = registry.names().map(str::to_string).collect();
        for purchase in purchases {
            if !categories.iter().any(|name| name == &purchase.category) {
                categories.push(purchase.category.clone());
            }
        }
        categories
    }
}

fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
