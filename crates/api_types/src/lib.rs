use serde::{Deserialize, Serialize};

/// Response envelope used by every endpoint of the admin API.
///
/// The backend reports failures inside the body: `status: false` with a
/// `message`, often together with an HTTP 2xx. A missing `data` on a
/// successful list response means "no records", not an error.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdminLogin {
        pub email: String,
        pub password: String,
    }

    /// The session user returned by the login endpoint.
    ///
    /// Ids are Mongo hex strings; `mobile` is absent on older accounts.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        #[serde(rename = "_id", alias = "id")]
        pub id: String,
        pub name: Option<String>,
        pub email: Option<String>,
        pub mobile: Option<String>,
        pub role: Option<String>,
    }
}

pub mod contract {
    use super::*;

    /// A WEC/AMC record as the server sends it.
    ///
    /// Dates arrive as `YYYY-MM-DD` strings and the creation timestamp is
    /// spelled `createdAt` or `createdDate` depending on the endpoint, so
    /// everything beyond the id stays optional here and is normalized by
    /// the client.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ContractView {
        #[serde(rename = "_id", alias = "id")]
        pub id: String,
        #[serde(alias = "customerName")]
        pub customer: Option<String>,
        pub customer_email: Option<String>,
        pub customer_mobile: Option<String>,
        pub category: Option<String>,
        pub brand: Option<String>,
        pub model: Option<String>,
        #[serde(alias = "purchaseValue")]
        pub amount: Option<f64>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        #[serde(alias = "createdDate")]
        pub created_at: Option<String>,
    }

    /// Request body for `api/amc/create-amc`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ContractNew {
        pub admin_id: String,
        pub customer_name: String,
        pub customer_email: String,
        pub customer_mobile: String,
        pub customer_address: String,
        pub serial_number: String,
        /// File name of the uploaded purchase proof, if any.
        pub purchase_proof: Option<String>,
        pub category: String,
        pub brand: String,
        #[serde(rename = "type")]
        pub product_type: String,
        pub model: String,
        /// Base value in rupees, before tax.
        pub purchase_value: f64,
        pub gst_amount: f64,
        pub total_amount: f64,
        pub start_date: String,
        pub end_date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ContractCreated {
        #[serde(rename = "_id", alias = "id")]
        pub id: String,
    }
}

pub mod wallet {
    use super::*;

    /// Totals from `api/transaction/getWalletManagementByAdmin/{id}`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WalletSummary {
        pub total_balance: Option<f64>,
        pub total_credit: Option<f64>,
        pub total_debit: Option<f64>,
    }
}

pub mod transaction {
    use super::*;

    /// A wallet ledger row.
    ///
    /// `type` is `"credit"` or `"debit"` on the wire; anything else is
    /// treated as unclassified downstream.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        #[serde(rename = "_id", alias = "id")]
        pub id: String,
        pub description: Option<String>,
        pub amount: Option<f64>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        #[serde(alias = "createdAt", alias = "createdDate")]
        pub date: Option<String>,
    }
}

pub mod dashboard {
    use super::*;

    /// Aggregate counters from `api/dashboard/get-all-amc-total`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DashboardTotals {
        pub total_amc: Option<f64>,
        pub total_active_account: Option<f64>,
        pub total_expiring_this_month: Option<f64>,
        pub total_revenue: Option<f64>,
        pub total_distributors: Option<f64>,
        pub total_retailers: Option<f64>,
        pub amc_sales_data: Option<Vec<MonthlyPoint>>,
        pub amc_revenue_data: Option<Vec<MonthlyPoint>>,
        pub amc_recent_activities: Option<Vec<ActivityView>>,
    }

    /// One month of the sales/revenue series. The label key and the value
    /// key both vary by endpoint version, hence the aliases.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MonthlyPoint {
        #[serde(alias = "label")]
        pub month: Option<String>,
        #[serde(alias = "sales", alias = "revenue")]
        pub value: Option<f64>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ActivityView {
        pub action: Option<String>,
        pub user: Option<String>,
        pub time: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_failure_keeps_message() {
        let raw = r#"{"status":false,"message":"boom"}"#;
        let env: Envelope<Vec<contract::ContractView>> =
            serde_json::from_str(raw).unwrap();
        assert!(!env.status);
        assert_eq!(env.message.as_deref(), Some("boom"));
        assert!(env.data.is_none());
    }

    #[test]
    fn contract_accepts_either_created_key() {
        let a: contract::ContractView =
            serde_json::from_str(r#"{"_id":"WEC001","createdAt":"2024-01-15"}"#).unwrap();
        let b: contract::ContractView =
            serde_json::from_str(r#"{"id":"WEC002","createdDate":"2024-01-16"}"#).unwrap();
        assert_eq!(a.created_at.as_deref(), Some("2024-01-15"));
        assert_eq!(b.created_at.as_deref(), Some("2024-01-16"));
    }

    #[test]
    fn transaction_type_key_maps_to_kind() {
        let tx: transaction::TransactionView =
            serde_json::from_str(r#"{"_id":"t1","type":"credit","amount":150.0}"#).unwrap();
        assert_eq!(tx.kind.as_deref(), Some("credit"));
    }
}
