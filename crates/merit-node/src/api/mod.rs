//! HTTP API handlers.

pub mod activity;
pub mod health;
pub mod notify;

use axum::http::StatusCode;
use merit_core::MeritError;
use serde::Serialize;

use crate::engine::RewardReport;

/// Delivery facts for a level-up, as presented on the wire.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RewardView {
    Delivered { amount: u64, receipt_id: String },
    Undelivered { reason: String },
    AddressNotFound,
}

impl From<RewardReport> for RewardView {
    fn from(report: RewardReport) -> Self {
        match report {
            RewardReport::Delivered { amount, receipt_id } => {
                RewardView::Delivered { amount, receipt_id }
            }
            RewardReport::Undelivered { reason } => RewardView::Undelivered { reason },
            RewardReport::AddressNotFound => RewardView::AddressNotFound,
        }
    }
}

/// Map an engine error to an HTTP response.
pub fn error_response(err: MeritError) -> (StatusCode, String) {
    let status = match &err {
        MeritError::LedgerUnavailable { .. } | MeritError::ResolverUnavailable { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        MeritError::AddressNotFound { .. } => StatusCode::NOT_FOUND,
        MeritError::DispatchFailed { .. } => StatusCode::BAD_GATEWAY,
        MeritError::InvalidTransition { .. } | MeritError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}
