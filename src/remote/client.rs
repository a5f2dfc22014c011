//! HTTP client for the remote settlement endpoint.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, ControllerResult};
use crate::models::SettlementPayload;

/// The single remote operation the controller consumes.
///
/// The endpoint's internal computation is opaque; only its input/output
/// contract matters here. `Ok(None)` means the call succeeded but the
/// response carried no payload, which the controller treats as a rejection.
#[async_trait]
pub trait SettlementApi: Send + Sync {
    /// Requests the settlement breakdown for an employee as of a date.
    async fn get_full_and_final_payload(
        &self,
        employee: &str,
        transaction_date: Option<NaiveDate>,
    ) -> ControllerResult<Option<SettlementPayload>>;
}

/// Request body of the RPC call.
#[derive(Debug, Serialize)]
struct RpcArgs<'a> {
    employee: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_date: Option<NaiveDate>,
}

/// The host framework wraps whitelisted-method results in a `message` key.
#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    message: Option<SettlementPayload>,
}

/// [`SettlementApi`] implementation over HTTP.
///
/// Posts to `{base_url}/api/method/{method}` and unwraps the RPC envelope.
///
/// # Example
///
/// ```no_run
/// use fnf_settlement::remote::HttpSettlementApi;
///
/// let api = HttpSettlementApi::new(
///     "https://erp.example.com",
///     "hr.api.settlement.get_full_and_final_payload",
/// ).unwrap();
/// # let _ = api;
/// ```
#[derive(Debug, Clone)]
pub struct HttpSettlementApi {
    client: Client,
    base_url: String,
    method: String,
}

impl HttpSettlementApi {
    /// Creates a client for the given server and dotted method name.
    pub fn new(base_url: &str, method: &str) -> ControllerResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ControllerError::RemoteCall {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            method: method.to_string(),
        })
    }

    /// The server base URL this client posts to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SettlementApi for HttpSettlementApi {
    async fn get_full_and_final_payload(
        &self,
        employee: &str,
        transaction_date: Option<NaiveDate>,
    ) -> ControllerResult<Option<SettlementPayload>> {
        let url = format!("{}/api/method/{}", self.base_url, self.method);
        let args = RpcArgs {
            employee,
            transaction_date,
        };

        let response = self
            .client
            .post(&url)
            .json(&args)
            .send()
            .await
            .map_err(|e| ControllerError::RemoteCall {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ControllerError::RemoteCall {
                message: format!("{} returned {}: {}", self.method, status, body),
            });
        }

        let envelope: RpcEnvelope =
            response
                .json()
                .await
                .map_err(|e| ControllerError::RemoteCall {
                    message: e.to_string(),
                })?;

        Ok(envelope.message)
    }
}
