//! Upstream boundary: turns GitHub-shaped payloads into series and user
//! summaries, and defines the seam data sources plug into.
//!
//! Everything string-typed (dates, timestamps, error bodies) is normalized
//! here so the analyzer only ever sees `NaiveDate`s in ascending order.

use crate::errors::UpstreamError;
use crate::models::{
    ContributionSeries, DailyContribution, ReportedTotals, UpstreamBundle, UserSummary,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, account: &str) -> Result<UpstreamBundle, UpstreamError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionPayload {
    contribution_calendar: CalendarPayload,
    #[serde(default)]
    restricted_contributions_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CalendarPayload {
    weeks: Vec<WeekPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekPayload {
    contribution_days: Vec<DayPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayPayload {
    date: NaiveDate,
    contribution_count: u32,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
    avatar_url: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    #[serde(default)]
    followers: u64,
    #[serde(default)]
    following: u64,
    #[serde(default)]
    public_repos: u64,
    total_pull_requests: Option<u64>,
    total_issues: Option<u64>,
    created_at: String,
}

pub fn parse_bundle(calendar: Value, user: Option<Value>) -> Result<UpstreamBundle, UpstreamError> {
    let series = parse_calendar(calendar)?;
    let user = user.map(parse_user).transpose()?;
    Ok(UpstreamBundle { series, user })
}

/// Accepts either the full GraphQL response
/// (`data.user.contributionsCollection`) or the collection object itself.
pub fn parse_calendar(value: Value) -> Result<ContributionSeries, UpstreamError> {
    reject_error_body(&value)?;

    let collection = if value.get("data").is_some() {
        let user = value
            .pointer("/data/user")
            .filter(|user| !user.is_null())
            .ok_or_else(|| UpstreamError::Rejected("user not found".into()))?;
        user.get("contributionsCollection")
            .cloned()
            .ok_or_else(|| missing("contributionsCollection"))?
    } else {
        value
    };

    let payload: CollectionPayload = serde_json::from_value(collection)
        .map_err(|err| UpstreamError::InvalidPayload(err.to_string()))?;

    let days = payload
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| DailyContribution::new(day.date, day.contribution_count))
        .collect();

    Ok(ContributionSeries::new(days).with_reported(ReportedTotals {
        public: None,
        private: payload.restricted_contributions_count,
    }))
}

pub fn parse_user(value: Value) -> Result<UserSummary, UpstreamError> {
    reject_error_body(&value)?;

    let payload: UserPayload = serde_json::from_value(value)
        .map_err(|err| UpstreamError::InvalidPayload(err.to_string()))?;
    let created_at = NaiveDateTime::parse_from_str(&payload.created_at, "%Y-%m-%dT%H:%M:%SZ")
        .map_err(|err| {
            UpstreamError::InvalidPayload(format!(
                "created_at {:?}: {err}",
                payload.created_at
            ))
        })?
        .date();

    Ok(UserSummary {
        login: payload.login,
        avatar_url: payload.avatar_url,
        bio: payload.bio,
        location: payload.location,
        followers: payload.followers,
        following: payload.following,
        repositories: payload.public_repos,
        total_pull_requests: payload.total_pull_requests,
        total_issues: payload.total_issues,
        created_at,
    })
}

/// GraphQL errors come back as an `errors` array, REST errors as an object
/// carrying only a `message`.
fn reject_error_body(value: &Value) -> Result<(), UpstreamError> {
    if let Some(errors) = value.get("errors") {
        let messages: Vec<&str> = errors
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|err| err.get("message").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default();
        let reason = if messages.is_empty() {
            errors.to_string()
        } else {
            messages.join("; ")
        };
        return Err(UpstreamError::Rejected(reason));
    }

    if value.get("login").is_none() && value.get("data").is_none() {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return Err(UpstreamError::Rejected(message.to_string()));
        }
    }

    Ok(())
}

fn missing(field: &str) -> UpstreamError {
    UpstreamError::InvalidPayload(format!("missing field `{field}`"))
}
