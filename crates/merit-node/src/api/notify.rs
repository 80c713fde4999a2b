//! Out-of-band level-up notification endpoint.

use axum::{extract::State, http::StatusCode, Json};
use merit_core::Identity;
use serde::{Deserialize, Serialize};

use crate::api::{error_response, RewardView};
use crate::engine::RewardReport;
use crate::state::AppState;

/// A notification from an external service asking for an on-demand reward
/// dispatch check for one identity.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub identity: String,
    pub display_name: String,

    /// Context the presentation layer will announce into. The engine only
    /// echoes it back.
    pub channel: String,
}

/// Standing plus delivery facts, for the presentation layer to announce.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub identity: String,
    pub channel: String,
    pub xp: u64,
    pub level: u64,
    pub xp_to_next: u64,

    /// Absent below level 1, where there is nothing to reward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<RewardView>,
}

/// Handle an out-of-band level-up notification.
pub async fn notify_level_up(
    State(state): State<AppState>,
    Json(req): Json<NotifyRequest>,
) -> Result<Json<NotifyResponse>, (StatusCode, String)> {
    let identity = Identity::new(req.identity.clone());

    let (report, reward) = state
        .engine
        .on_demand_check(identity, &req.display_name)
        .await
        .map_err(error_response)?;

    // A directory miss is a 404 here: the caller asked for a dispatch and
    // none could be attempted. XP stays committed either way.
    if matches!(reward, Some(RewardReport::AddressNotFound)) {
        return Err((
            StatusCode::NOT_FOUND,
            format!("no payment address on record for {}", req.display_name),
        ));
    }

    Ok(Json(NotifyResponse {
        identity: req.identity,
        channel: req.channel,
        xp: report.xp,
        level: report.level,
        xp_to_next: report.xp_to_next,
        reward: reward.map(Into::into),
    }))
}
