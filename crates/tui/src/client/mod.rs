use reqwest::Url;
use serde::{Serialize, de::DeserializeOwned};

use api_types::{
    Envelope,
    contract::{ContractNew, ContractView},
    dashboard::DashboardTotals,
    transaction::TransactionView,
    user::{AdminLogin, UserView},
    wallet::WalletSummary,
};
use listview::FetchError;

use crate::error::{AppError, Result};

/// Thin wrapper over the admin HTTP API.
///
/// Every method returns `FetchError`, never a raw reqwest error, so results
/// feed straight into a resource or controller: transport problems become
/// `Network`, an envelope with `status: false` becomes `Rejected`, and a
/// successful envelope without required data becomes `Malformed`.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(AppError::BaseUrl("base_url is empty".to_string()));
        }
        let base_url = Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> std::result::Result<UserView, FetchError> {
        let payload = AdminLogin {
            email: email.to_string(),
            password: password.to_string(),
        };
        let envelope = self
            .post_envelope("api/nodeadmin/adminlogin", &payload)
            .await?;
        require_data(envelope, "user")
    }

    pub async fn contracts(
        &self,
        admin_id: &str,
    ) -> std::result::Result<Vec<ContractView>, FetchError> {
        let path = format!("api/amc/get-all-amc-by-admin/{admin_id}");
        let envelope = self.get_envelope(&path, &[]).await?;
        require_list(envelope)
    }

    /// Creates a contract and returns the server's confirmation message.
    pub async fn create_contract(
        &self,
        body: &ContractNew,
    ) -> std::result::Result<String, FetchError> {
        let envelope: Envelope<serde_json::Value> =
            self.post_envelope("api/amc/create-amc", body).await?;
        if !envelope.status {
            return Err(rejection(envelope.message));
        }
        Ok(envelope
            .message
            .unwrap_or_else(|| "WEC created".to_string()))
    }

    pub async fn dashboard_totals(
        &self,
        role: &str,
        email: &str,
    ) -> std::result::Result<DashboardTotals, FetchError> {
        let envelope = self
            .get_envelope(
                "api/dashboard/get-all-amc-total",
                &[("role", role), ("createdByEmail", email)],
            )
            .await?;
        require_data(envelope, "dashboard totals")
    }

    pub async fn wallet_summary(
        &self,
        admin_id: &str,
    ) -> std::result::Result<WalletSummary, FetchError> {
        let path = format!("api/transaction/getWalletManagementByAdmin/{admin_id}");
        let envelope = self.get_envelope(&path, &[]).await?;
        require_data(envelope, "wallet summary")
    }

    pub async fn wallet_transactions(
        &self,
        role: &str,
        email: &str,
    ) -> std::result::Result<Vec<TransactionView>, FetchError> {
        let envelope = self
            .get_envelope(
                "api/transaction/get-transaction-by-admin-with-pagination",
                &[("role", role), ("createdByEmail", email)],
            )
            .await?;
        require_list(envelope)
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> std::result::Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| FetchError::Malformed(format!("invalid endpoint {path}: {err}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Envelope<T>, FetchError> {
        let url = self.endpoint(path, query)?;
        let response = self.http.get(url).send().await.map_err(|err| {
            tracing::debug!(path, "request failed: {err}");
            FetchError::Network(err.to_string())
        })?;
        decode(path, response).await
    }

    async fn post_envelope<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<Envelope<T>, FetchError> {
        let url = self.endpoint(path, &[])?;
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(path, "request failed: {err}");
                FetchError::Network(err.to_string())
            })?;
        decode(path, response).await
    }
}

/// The backend reports failures inside the body and may pair them with any
/// HTTP status, so the envelope is parsed regardless of the code. A body
/// that parses as no envelope at all is malformed on a 2xx and a transport
/// failure otherwise.
async fn decode<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> std::result::Result<Envelope<T>, FetchError> {
    let status = response.status();
    match response.json::<Envelope<T>>().await {
        Ok(envelope) => Ok(envelope),
        Err(err) if status.is_success() => {
            tracing::debug!(path, %status, "undecodable body: {err}");
            Err(FetchError::Malformed(err.to_string()))
        }
        Err(_) => Err(FetchError::Network(format!("http {status}"))),
    }
}

fn rejection(message: Option<String>) -> FetchError {
    FetchError::Rejected(message.unwrap_or_else(|| "request rejected".to_string()))
}

/// A successful list envelope with no `data` means "no records".
fn require_list<T>(envelope: Envelope<Vec<T>>) -> std::result::Result<Vec<T>, FetchError> {
    if !envelope.status {
        return Err(rejection(envelope.message));
    }
    Ok(envelope.data.unwrap_or_default())
}

/// A successful detail envelope must carry its payload.
fn require_data<T>(envelope: Envelope<T>, what: &str) -> std::result::Result<T, FetchError> {
    if !envelope.status {
        return Err(rejection(envelope.message));
    }
    envelope
        .data
        .ok_or_else(|| FetchError::Malformed(format!("{what} missing from response")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope<T>(status: bool, data: Option<T>, message: Option<&str>) -> Envelope<T> {
        Envelope {
            status,
            data,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn empty_base_url_is_refused() {
        assert!(Client::new("").is_err());
        assert!(Client::new("   ").is_err());
        assert!(Client::new("not a url").is_err());
        assert!(Client::new("http://127.0.0.1:8000").is_ok());
    }

    #[test]
    fn rejected_envelope_surfaces_its_message() {
        let env = envelope::<Vec<u8>>(false, None, Some("invalid admin"));
        assert_eq!(
            require_list(env),
            Err(FetchError::Rejected("invalid admin".to_string()))
        );
    }

    #[test]
    fn successful_list_without_data_is_empty() {
        let env = envelope::<Vec<u8>>(true, None, None);
        assert_eq!(require_list(env), Ok(Vec::new()));
    }

    #[test]
    fn successful_detail_without_data_is_malformed() {
        let env = envelope::<u8>(true, None, None);
        assert!(matches!(
            require_data(env, "wallet summary"),
            Err(FetchError::Malformed(_))
        ));
    }
}
