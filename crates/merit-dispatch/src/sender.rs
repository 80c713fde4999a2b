//! The external payment call.

use async_trait::async_trait;
use merit_core::{MeritError, Result};
use serde::{Deserialize, Serialize};

/// Performs one external payment.
///
/// The dispatcher makes exactly one call per reward-worthy transition.
/// Implementations must not retry internally: without an idempotency key
/// from the payment medium, a retry is a second real-world payment.
#[async_trait]
pub trait PaymentSender: Send + Sync {
    /// Transfer `amount` smallest units to `destination`, returning the
    /// receipt id the payment medium handed back.
    async fn send(&self, destination: &str, amount: u64) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    amount: u64,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    txid: String,
}

/// Sender that forwards to an HTTP wallet bridge.
///
/// The bridge owns keys and network broadcast; this side only posts
/// `{"to", "amount"}` and reads back a transaction id. Once the post is
/// accepted the attempt cannot be aborted.
pub struct HttpWalletSender {
    http_client: reqwest::Client,
    wallet_url: String,
}

impl HttpWalletSender {
    /// Sender posting to the given wallet bridge URL.
    pub fn new(wallet_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            wallet_url: wallet_url.into(),
        }
    }
}

#[async_trait]
impl PaymentSender for HttpWalletSender {
    async fn send(&self, destination: &str, amount: u64) -> Result<String> {
        let url = format!("{}/send", self.wallet_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .json(&SendRequest {
                to: destination,
                amount,
            })
            .send()
            .await
            .map_err(|e| MeritError::DispatchFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MeritError::DispatchFailed {
                reason: format!("wallet bridge returned {status}: {body}"),
            });
        }

        let receipt: SendResponse =
            response
                .json()
                .await
                .map_err(|e| MeritError::DispatchFailed {
                    reason: format!("malformed wallet response: {e}"),
                })?;

        Ok(receipt.txid)
    }
}
