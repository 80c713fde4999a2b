//! Activity intake and progress query endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use merit_core::Identity;
use serde::{Deserialize, Serialize};

use crate::api::{error_response, RewardView};
use crate::engine::ActivityOutcome;
use crate::state::AppState;

/// One observed activity event.
///
/// `identity` keys the ledger; `display_name` keys the address directory.
/// Command/control messages are expected to be filtered out by the chat
/// front end before it posts here.
#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    pub identity: String,
    pub display_name: String,
    pub content: String,
}

/// What the event did to the identity's standing.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub identity: String,

    /// `ignored`, `credited`, or `leveled_up`.
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp_to_next: Option<u64>,

    /// Present only on a level-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<RewardView>,
}

/// Identity standing for a plain query.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub identity: String,
    pub xp: u64,
    pub level: u64,
    pub xp_to_next: u64,
}

/// Submit one activity event.
pub async fn submit_activity(
    State(state): State<AppState>,
    Json(req): Json<ActivityRequest>,
) -> Result<Json<ActivityResponse>, (StatusCode, String)> {
    let identity = Identity::new(req.identity.clone());

    let outcome = state
        .engine
        .credit_activity(identity, &req.display_name, &req.content)
        .await
        .map_err(error_response)?;

    let curve = state.engine.curve();
    let response = match outcome {
        ActivityOutcome::Ignored => ActivityResponse {
            identity: req.identity,
            status: "ignored".to_string(),
            xp: None,
            level: None,
            xp_to_next: None,
            reward: None,
        },
        ActivityOutcome::Credited { xp, level } => ActivityResponse {
            identity: req.identity,
            status: "credited".to_string(),
            xp: Some(xp),
            level: Some(level),
            xp_to_next: Some(curve.xp_to_next(xp)),
            reward: None,
        },
        ActivityOutcome::LeveledUp { transition, reward } => ActivityResponse {
            identity: req.identity,
            status: "leveled_up".to_string(),
            xp: Some(transition.new_xp),
            level: Some(transition.new_level),
            xp_to_next: Some(curve.xp_to_next(transition.new_xp)),
            reward: Some(reward.into()),
        },
    };

    Ok(Json(response))
}

/// Query an identity's current standing.
pub async fn get_progress(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<ProgressResponse>, (StatusCode, String)> {
    let report = state
        .engine
        .progress(Identity::new(identity))
        .await
        .map_err(error_response)?;

    Ok(Json(ProgressResponse {
        identity: report.identity.as_str().to_string(),
        xp: report.xp,
        level: report.level,
        xp_to_next: report.xp_to_next,
    }))
}
