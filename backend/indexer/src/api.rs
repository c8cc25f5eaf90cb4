//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::events::{CampaignView, EventRecord, MilestoneView};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    pub campaign_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct CampaignsResponse {
    pub count: usize,
    pub campaigns: Vec<CampaignView>,
}

#[derive(Serialize)]
pub struct CampaignDetailResponse {
    pub campaign: CampaignView,
    pub milestones: Vec<MilestoneView>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn internal_error(e: impl std::fmt::Display) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!(ErrorResponse {
            error: e.to_string()
        })),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
///
/// Returns all indexed events across all campaigns.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::get_all_events(&state.pool).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(AllEventsResponse { count, events })),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /campaigns`
///
/// Returns the materialized campaign views, newest first.
pub async fn get_campaigns(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::get_campaigns(&state.pool).await {
        Ok(campaigns) => {
            let count = campaigns.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(CampaignsResponse { count, campaigns })),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// `GET /campaigns/:id`
///
/// Returns one campaign view plus its milestone rows.
pub async fn get_campaign(
    State(state): State<Arc<ApiState>>,
    Path(campaign_id): Path<String>,
) -> impl IntoResponse {
    let campaign = match db::get_campaign(&state.pool, &campaign_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!(ErrorResponse {
                    error: format!("campaign {campaign_id} not found")
                })),
            )
                .into_response();
        }
        Err(e) => return internal_error(e),
    };

    match db::get_milestones_for_campaign(&state.pool, &campaign_id).await {
        Ok(milestones) => (
            StatusCode::OK,
            Json(serde_json::json!(CampaignDetailResponse {
                campaign,
                milestones,
            })),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /campaigns/:id/events`
///
/// Returns all indexed events for the given campaign.
pub async fn get_campaign_events(
    State(state): State<Arc<ApiState>>,
    Path(campaign_id): Path<String>,
) -> impl IntoResponse {
    match db::get_events_for_campaign(&state.pool, &campaign_id).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(EventsResponse {
                    campaign_id,
                    count,
                    events,
                })),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}
