use crate::cache::ReportKey;
use crate::errors::{AppError, UpstreamError};
use crate::models::{AnalysisOutcome, AnalyzeRequest, DashboardReport, ReportQuery};
use crate::report::{Window, assess, build_report};
use crate::source::parse_bundle;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

pub async fn health() -> &'static str {
    "ok"
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let window = window_from(payload.from, payload.to)?;
    let as_of = payload.as_of.unwrap_or_else(today);

    let fetched = match parse_bundle(payload.calendar, payload.user) {
        Err(UpstreamError::InvalidPayload(message)) => {
            return Err(AppError::bad_request(message));
        }
        fetched => fetched,
    };
    if let Err(err) = &fetched {
        warn!("upstream payload carried an error: {err}");
    }

    let outcome = assess(fetched, window, as_of, &state.config)?;
    Ok(Json(outcome))
}

pub async fn account_report(
    State(state): State<AppState>,
    Path(account): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DashboardReport>, AppError> {
    let window = window_from(query.from, query.to)?;
    let key = ReportKey {
        account,
        window,
        as_of: query.as_of.unwrap_or_else(today),
    };

    if let Some(report) = state.cache.get(&key).await {
        debug!("report cache hit for {}", key.account);
        return Ok(Json(report.as_ref().clone()));
    }

    let bundle = state.source.fetch(&key.account).await.map_err(|err| {
        warn!("data source failed for {}: {err}", key.account);
        AppError::from(err)
    })?;
    let report = build_report(bundle, window, key.as_of, &state.config)?;
    info!(
        "built report for {} ({} days, as of {})",
        key.account,
        report.days.len(),
        key.as_of
    );

    let stored = state.cache.insert(key, report).await;
    Ok(Json(stored.as_ref().clone()))
}

fn window_from(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Window, AppError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::bad_request(format!(
                "window start {from} is after its end {to}"
            )));
        }
    }
    Ok(Window { from, to })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
