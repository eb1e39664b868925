use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::money::Money;

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_EXPIRED: &str = "Expired";
pub const STATUS_EXPIRING_SOON: &str = "Expiring Soon";

/// Bucket for statuses outside the known vocabulary. Counting them here
/// instead of dropping them keeps `sum(by_status) == total`.
pub const STATUS_OTHER: &str = "Other";

/// Items an [`Aggregate`] can be computed over.
pub trait Summarize {
    /// Status bucket this item counts under, if classified.
    fn status_bucket(&self) -> Option<&str>;

    /// Key for the money sums (e.g. `"credit"` / `"debit"`). Items without
    /// a kind contribute to no sum.
    fn amount_bucket(&self) -> Option<&str> {
        None
    }

    fn amount(&self) -> Money {
        Money::ZERO
    }
}

/// Summary counts and sums over a full collection.
///
/// Always recomputed from scratch when the underlying data changes — the
/// server sends full replacements, so there is nothing to patch
/// incrementally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub sum_by_kind: BTreeMap<String, Money>,
}

impl Aggregate {
    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    pub fn sum(&self, kind: &str) -> Money {
        self.sum_by_kind.get(kind).copied().unwrap_or(Money::ZERO)
    }
}

/// Single pass over `items` producing total, per-status counts, and
/// per-kind money sums. Unknown statuses land in [`STATUS_OTHER`].
pub fn summarize<T: Summarize>(items: &[T]) -> Aggregate {
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut sum_by_kind: BTreeMap<String, Money> = BTreeMap::new();

    for item in items {
        let bucket = item.status_bucket().unwrap_or(STATUS_OTHER);
        *by_status.entry(bucket.to_string()).or_insert(0) += 1;

        if let Some(kind) = item.amount_bucket() {
            let entry = sum_by_kind.entry(kind.to_string()).or_insert(Money::ZERO);
            *entry = entry.saturating_add(item.amount());
        }
    }

    Aggregate {
        total: items.len(),
        by_status,
        sum_by_kind,
    }
}

/// Whether a third "Expiring Soon" bucket exists, and how wide it is.
///
/// The product screens disagree on this, so it is policy rather than a
/// default: with no threshold a contract is only `Active` or `Expired`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub expiring_within_days: Option<u32>,
}

impl ExpiryPolicy {
    pub fn with_window(days: u32) -> Self {
        Self {
            expiring_within_days: Some(days),
        }
    }
}

/// Classifies a contract window against `today`.
///
/// Status is derived, never stored: `Expired` iff the end date is strictly
/// before today, else `Active`, unless the policy puts it in the
/// `Expiring Soon` window.
pub fn classify_expiry(end_date: NaiveDate, today: NaiveDate, policy: ExpiryPolicy) -> &'static str {
    if end_date < today {
        return STATUS_EXPIRED;
    }
    if let Some(days) = policy.expiring_within_days
        && (end_date - today).num_days() <= i64::from(days)
    {
        return STATUS_EXPIRING_SOON;
    }
    STATUS_ACTIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        status: Option<&'static str>,
        kind: Option<&'static str>,
        amount: Money,
    }

    impl Summarize for Entry {
        fn status_bucket(&self) -> Option<&str> {
            self.status
        }

        fn amount_bucket(&self) -> Option<&str> {
            self.kind
        }

        fn amount(&self) -> Money {
            self.amount
        }
    }

    fn entry(status: Option<&'static str>, kind: Option<&'static str>, paise: i64) -> Entry {
        Entry {
            status,
            kind,
            amount: Money::new(paise),
        }
    }

    #[test]
    fn status_counts_cover_the_whole_collection() {
        let items = vec![
            entry(Some(STATUS_ACTIVE), None, 0),
            entry(Some(STATUS_ACTIVE), None, 0),
            entry(Some(STATUS_EXPIRED), None, 0),
            entry(Some("Suspended"), None, 0),
            entry(None, None, 0),
        ];

        let agg = summarize(&items);
        assert_eq!(agg.total, 5);
        assert_eq!(agg.count(STATUS_ACTIVE), 2);
        assert_eq!(agg.count(STATUS_EXPIRED), 1);
        assert_eq!(agg.count(STATUS_OTHER), 2);
        assert_eq!(agg.by_status.values().sum::<usize>(), agg.total);
    }

    #[test]
    fn empty_collection_summarizes_cleanly() {
        let agg = summarize::<Entry>(&[]);
        assert_eq!(agg.total, 0);
        assert!(agg.by_status.is_empty());
        assert_eq!(agg.sum("credit"), Money::ZERO);
    }

    #[test]
    fn kind_sums_are_decimal_safe() {
        let items = vec![
            entry(None, Some("credit"), 1000_00),
            entry(None, Some("credit"), 150_00),
            entry(None, Some("debit"), 1200_00),
            // Corrupt row normalized to zero at the boundary.
            entry(None, Some("debit"), Money::from_rupees(f64::NAN).paise()),
        ];

        let agg = summarize(&items);
        assert_eq!(agg.sum("credit"), Money::new(1150_00));
        assert_eq!(agg.sum("debit"), Money::new(1200_00));
    }

    #[test]
    fn expiry_is_strictly_before_today() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let policy = ExpiryPolicy::default();

        let yesterday = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        let next_year = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(classify_expiry(yesterday, today, policy), STATUS_EXPIRED);
        assert_eq!(classify_expiry(today, today, policy), STATUS_ACTIVE);
        assert_eq!(classify_expiry(next_year, today, policy), STATUS_ACTIVE);
    }

    #[test]
    fn expiring_soon_needs_an_explicit_window() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let in_ten_days = NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();

        assert_eq!(
            classify_expiry(in_ten_days, today, ExpiryPolicy::default()),
            STATUS_ACTIVE
        );
        assert_eq!(
            classify_expiry(in_ten_days, today, ExpiryPolicy::with_window(30)),
            STATUS_EXPIRING_SOON
        );
        assert_eq!(
            classify_expiry(in_ten_days, today, ExpiryPolicy::with_window(5)),
            STATUS_ACTIVE
        );
    }
}
