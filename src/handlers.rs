use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::format::{band_label, format_day_label, format_whole_currency, stage_label};
use crate::metrics::{
    DEFAULT_VELOCITY_WINDOW_DAYS, aggregate_by_stage, classify_by_health, compute_velocity,
};
use crate::models::{
    Activity, BandSlice, ChartData, Deal, DealInsights, DealListResponse, DealPatch, NewActivity,
    NewDeal, Stage, StageSlice, VelocitySlice,
};
use crate::state::AppState;
use crate::ui::render_dashboard;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_dashboard(&state.api.session().user.full_name))
}

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct DealsQuery {
    pub stage: Option<Stage>,
}

pub async fn get_charts(State(state): State<AppState>) -> Result<Json<ChartData>, AppError> {
    let listing = state.api.list_deals(None).await?;
    info!("aggregating charts over {} deals", listing.deals.len());

    // Backend timestamps are naive UTC, so the reference instant is too;
    // day bucketing happens on UTC calendar dates.
    let now = Utc::now().naive_utc();
    Ok(Json(build_chart_data(&listing.deals, now)?))
}

pub async fn list_deals(
    State(state): State<AppState>,
    Query(query): Query<DealsQuery>,
) -> Result<Json<DealListResponse>, AppError> {
    let listing = state.api.list_deals(query.stage).await?;
    Ok(Json(listing))
}

pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deal>, AppError> {
    Ok(Json(state.api.get_deal(id).await?))
}

pub async fn create_deal(
    State(state): State<AppState>,
    Json(payload): Json<NewDeal>,
) -> Result<(StatusCode, Json<Deal>), AppError> {
    if payload.value.is_sign_negative() {
        return Err(AppError::bad_request("value must not be negative"));
    }

    let deal = state.api.create_deal(&payload).await?;
    info!("created deal {} ({})", deal.id, deal.title);
    Ok((StatusCode::CREATED, Json(deal)))
}

pub async fn update_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DealPatch>,
) -> Result<Json<Deal>, AppError> {
    if let Some(value) = payload.value {
        if value.is_sign_negative() {
            return Err(AppError::bad_request("value must not be negative"));
        }
    }

    let deal = state.api.update_deal(id, &payload).await?;
    info!("updated deal {} ({})", deal.id, deal.title);
    Ok(Json(deal))
}

pub async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.api.delete_deal(id).await?;
    info!("deleted deal {id}");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn deal_activities(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Activity>>, AppError> {
    Ok(Json(state.api.list_activities(id).await?))
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<NewActivity>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    let activity = state.api.create_activity(&payload).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn get_insights(State(state): State<AppState>) -> Result<Json<DealInsights>, AppError> {
    Ok(Json(state.api.fetch_insights().await?))
}

fn build_chart_data(deals: &[Deal], now: NaiveDateTime) -> Result<ChartData, AppError> {
    let pipeline = aggregate_by_stage(deals)?
        .into_iter()
        .map(|bucket| StageSlice {
            stage: bucket.stage,
            label: stage_label(bucket.stage),
            display_value: format_whole_currency(bucket.total_value),
            total_value: bucket.total_value,
        })
        .collect();

    let health = classify_by_health(deals)?
        .into_iter()
        .map(|band| BandSlice {
            band: band.band.as_str(),
            label: band_label(band.band),
            count: band.count,
        })
        .collect();

    let velocity = compute_velocity(deals, now, DEFAULT_VELOCITY_WINDOW_DAYS)?
        .into_iter()
        .map(|point| VelocitySlice {
            label: format_day_label(point.date),
            date: point.date,
            count: point.count,
        })
        .collect();

    Ok(ChartData {
        pipeline,
        health,
        velocity,
    })
}
