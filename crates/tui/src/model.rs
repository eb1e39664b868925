use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use api_types::{
    contract::ContractView, dashboard::DashboardTotals, transaction::TransactionView,
    wallet::WalletSummary,
};
use listview::{ExpiryPolicy, Filterable, Money, Summarize, classify_expiry};

pub const KIND_CREDIT: &str = "credit";
pub const KIND_DEBIT: &str = "debit";

/// A contract after boundary normalization: fixed field names, parsed
/// dates, a minor-unit amount, and a status derived from the end date.
/// Nothing downstream branches on wire-shape quirks again.
#[derive(Debug, Clone)]
pub struct Contract {
    pub id: String,
    pub customer: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub amount: Money,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<&'static str>,
    pub days_left: Option<i64>,
}

impl Contract {
    pub fn from_view(view: ContractView, today: NaiveDate, policy: ExpiryPolicy) -> Self {
        let end_date = view.end_date.as_deref().and_then(parse_date);
        Self {
            id: view.id,
            customer: view.customer,
            category: view.category,
            brand: view.brand,
            model: view.model,
            amount: view.amount.map(Money::from_rupees).unwrap_or(Money::ZERO),
            start_date: view.start_date.as_deref().and_then(parse_date),
            end_date,
            status: end_date.map(|end| classify_expiry(end, today, policy)),
            days_left: end_date.map(|end| (end - today).num_days()),
        }
    }
}

impl Filterable for Contract {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        if let Some(customer) = self.customer.as_deref() {
            fields.push(customer);
        }
        fields
    }

    fn status_label(&self) -> Option<&str> {
        self.status
    }

    fn category_label(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Summarize for Contract {
    fn status_bucket(&self) -> Option<&str> {
        self.status
    }
}

/// A wallet ledger row with a lowercased kind and a UTC timestamp.
#[derive(Debug, Clone)]
pub struct WalletTransaction {
    pub id: String,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub amount: Money,
    pub date: Option<DateTime<Utc>>,
}

impl From<TransactionView> for WalletTransaction {
    fn from(view: TransactionView) -> Self {
        Self {
            id: view.id,
            description: view.description,
            kind: view.kind.map(|kind| kind.to_lowercase()),
            amount: view.amount.map(Money::from_rupees).unwrap_or(Money::ZERO),
            date: view.date.as_deref().and_then(parse_timestamp),
        }
    }
}

impl WalletTransaction {
    pub fn is_credit(&self) -> bool {
        self.kind.as_deref() == Some(KIND_CREDIT)
    }

    pub fn date_label(&self, tz: Tz) -> String {
        self.date
            .map(|date| date.with_timezone(&tz).format("%d %b %Y").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

impl Filterable for WalletTransaction {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        if let Some(description) = self.description.as_deref() {
            fields.push(description);
        }
        fields
    }

    fn status_label(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn category_label(&self) -> Option<&str> {
        None
    }
}

impl Summarize for WalletTransaction {
    fn status_bucket(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn amount_bucket(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

/// Wallet headline totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalletTotals {
    pub balance: Money,
    pub credit: Money,
    pub debit: Money,
}

impl From<WalletSummary> for WalletTotals {
    fn from(view: WalletSummary) -> Self {
        Self {
            balance: view.total_balance.map(Money::from_rupees).unwrap_or(Money::ZERO),
            credit: view.total_credit.map(Money::from_rupees).unwrap_or(Money::ZERO),
            debit: view.total_debit.map(Money::from_rupees).unwrap_or(Money::ZERO),
        }
    }
}

/// Dashboard numbers with counts coerced to integers and series flattened
/// into label/value pairs ready for bar rendering.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub total_contracts: u64,
    pub active_contracts: u64,
    pub expiring_this_month: u64,
    pub revenue: Money,
    pub distributors: u64,
    pub retailers: u64,
    pub monthly_sales: Vec<(String, u64)>,
    pub monthly_revenue: Vec<(String, Money)>,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone)]
pub struct Activity {
    pub action: String,
    pub user: String,
    pub time: String,
}

impl From<DashboardTotals> for Dashboard {
    fn from(view: DashboardTotals) -> Self {
        let monthly_sales = view
            .amc_sales_data
            .unwrap_or_default()
            .into_iter()
            .map(|point| {
                (
                    point.month.unwrap_or_else(|| "N/A".to_string()),
                    point.value.map(as_count).unwrap_or(0),
                )
            })
            .collect();
        let monthly_revenue = view
            .amc_revenue_data
            .unwrap_or_default()
            .into_iter()
            .map(|point| {
                (
                    point.month.unwrap_or_else(|| "N/A".to_string()),
                    point.value.map(Money::from_rupees).unwrap_or(Money::ZERO),
                )
            })
            .collect();
        let activities = view
            .amc_recent_activities
            .unwrap_or_default()
            .into_iter()
            .map(|activity| Activity {
                action: activity.action.unwrap_or_default(),
                user: activity.user.unwrap_or_default(),
                time: activity.time.unwrap_or_default(),
            })
            .collect();

        Self {
            total_contracts: view.total_amc.map(as_count).unwrap_or(0),
            active_contracts: view.total_active_account.map(as_count).unwrap_or(0),
            expiring_this_month: view.total_expiring_this_month.map(as_count).unwrap_or(0),
            revenue: view.total_revenue.map(Money::from_rupees).unwrap_or(Money::ZERO),
            distributors: view.total_distributors.map(as_count).unwrap_or(0),
            retailers: view.total_retailers.map(as_count).unwrap_or(0),
            monthly_sales,
            monthly_revenue,
            activities,
        }
    }
}

/// Counter fields arrive as JSON numbers; anything non-finite or negative
/// collapses to zero instead of wrapping.
fn as_count(value: f64) -> u64 {
    if !value.is_finite() || value < 0.0 {
        return 0;
    }
    value.round() as u64
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Accepts a full RFC 3339 timestamp or a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use listview::{STATUS_ACTIVE, STATUS_EXPIRED};

    fn view(id: &str, end_date: Option<&str>) -> ContractView {
        ContractView {
            id: id.to_string(),
            customer: Some("Rohit Rajput".to_string()),
            customer_email: None,
            customer_mobile: None,
            category: Some("AC".to_string()),
            brand: Some("Voltas".to_string()),
            model: None,
            amount: Some(2500.0),
            start_date: Some("2024-01-15".to_string()),
            end_date: end_date.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn contract_status_is_derived_from_the_end_date() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let policy = ExpiryPolicy::default();

        let active = Contract::from_view(view("W1", Some("2025-12-30")), today, policy);
        let expired = Contract::from_view(view("W2", Some("2023-12-31")), today, policy);
        let dateless = Contract::from_view(view("W3", None), today, policy);

        assert_eq!(active.status, Some(STATUS_ACTIVE));
        assert_eq!(expired.status, Some(STATUS_EXPIRED));
        assert_eq!(dateless.status, None);
        assert_eq!(active.amount, Money::new(2500_00));
    }

    #[test]
    fn both_date_spellings_parse() {
        assert!(parse_date("2024-01-15").is_some());
        assert!(parse_date("2024-01-15T10:30:00+05:30").is_some());
        assert!(parse_date("15/01/2024").is_none());

        let midnight = parse_timestamp("2025-10-01").unwrap();
        assert_eq!(midnight.date_naive(), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    }

    #[test]
    fn transaction_kind_is_lowercased() {
        let tx = WalletTransaction::from(TransactionView {
            id: "t1".to_string(),
            description: Some("Wallet Recharge".to_string()),
            amount: Some(1000.0),
            kind: Some("Credit".to_string()),
            date: Some("2025-10-10T09:00:00Z".to_string()),
        });
        assert!(tx.is_credit());
        assert_eq!(tx.amount, Money::new(1000_00));
    }

    #[test]
    fn corrupt_counters_collapse_to_zero() {
        assert_eq!(as_count(f64::NAN), 0);
        assert_eq!(as_count(-3.0), 0);
        assert_eq!(as_count(12.4), 12);
    }
}
