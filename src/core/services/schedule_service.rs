use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{MonthKey, Purchase};

/// Months between a purchase's start date and its first installment.
///
/// The first installment is due in the start month itself, which keeps
/// `Purchase::end_date` equal to the last scheduled bucket.
pub const FIRST_INSTALLMENT_OFFSET: u32 = 0;

/// One scheduled partial payment of a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentEvent {
    pub purchase_id: Uuid,
    pub bucket: MonthKey,
    pub due_date: NaiveDate,
    pub amount: f64,
    /// 1-based position within the schedule.
    pub index: u32,
    pub count: u32,
}

pub struct ScheduleService;

impl ScheduleService {
    /// Splits the purchase price evenly across consecutive calendar months.
    ///
    /// Every installment carries `price / installments`; the last one absorbs
    /// the floating-point residue so the schedule sums back to the price.
    pub fn schedule(purchase: &Purchase) -> Vec<InstallmentEvent> {
        let count = purchase.installments.max(1);
        let amount = purchase.price / count as f64;
        let residual = purchase.price - amount * (count - 1) as f64;

        (1..=count)
            .map(|index| {
                let due_date = purchase.installment_date(FIRST_INSTALLMENT_OFFSET + index - 1);
                InstallmentEvent {
                    purchase_id: purchase.id,
                    bucket: MonthKey::from_date(due_date),
                    due_date,
                    amount: if index == count { residual } else { amount },
                    index,
                    count,
                }
            })
            .collect()
    }

    /// Schedules for every purchase, flattened in canonical order.
    pub fn schedule_all(purchases: &[Purchase]) -> Vec<InstallmentEvent> {
        purchases.iter().flat_map(Self::schedule).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PurchaseDraft, MAX_INSTALLMENTS};

    fn purchase(price: f64, installments: i64, start: NaiveDate) -> Purchase {
        PurchaseDraft::new("Item", price, installments, "Comida", start)
            .validate()
            .expect("valid purchase")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn splits_evenly_starting_in_the_purchase_month() {
        let events = ScheduleService::schedule(&purchase(300.0, 3, date(2024, 1, 15)));
        let buckets: Vec<_> = events.iter().map(|e| e.bucket.to_string()).collect();
        assert_eq!(buckets, vec!["2024-01", "2024-02", "2024-03"]);
        assert!(events.iter().all(|e| e.amount == 100.0));
        assert_eq!(
            events.iter().map(|e| e.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn sum_reconstructs_price_for_awkward_splits() {
        for (price, count) in [(100.0, 3), (0.1, 7), (999.99, 12), (1.0, 1)] {
            let events = ScheduleService::schedule(&purchase(price, count, date(2024, 5, 1)));
            assert_eq!(events.len(), count as usize);
            let total: f64 = events.iter().map(|e| e.amount).sum();
            assert!((total - price).abs() < 1e-9, "{price}/{count} summed to {total}");
        }
    }

    #[test]
    fn end_of_month_start_clamps_without_drifting() {
        let events = ScheduleService::schedule(&purchase(40.0, 4, date(2024, 1, 31)));
        let due: Vec<_> = events.iter().map(|e| e.due_date).collect();
        assert_eq!(
            due,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30)
            ]
        );
    }

    #[test]
    fn last_bucket_matches_end_date() {
        let item = purchase(1200.0, 18, date(2024, 11, 3));
        let events = ScheduleService::schedule(&item);
        assert_eq!(
            events.last().map(|e| e.bucket),
            Some(MonthKey::from_date(item.end_date()))
        );
    }

    #[test]
    fn longest_plan_spans_distinct_consecutive_months() {
        let start = date(2024, 1, 15);
        let item = purchase(100.0, MAX_INSTALLMENTS as i64, start);
        let events = ScheduleService::schedule(&item);
        assert_eq!(events.len(), MAX_INSTALLMENTS as usize);
        let first = MonthKey::from_date(start);
        for (offset, event) in events.iter().enumerate() {
            assert_eq!(event.bucket, first.offset(offset as i64));
        }
        assert_eq!(events.last().map(|e| e.bucket), Some(MonthKey::new(2073, 12).unwrap()));
    }
}
