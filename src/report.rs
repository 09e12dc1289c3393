use crate::config::AnalyzerConfig;
use crate::errors::{AnalysisError, UpstreamError};
use crate::models::{
    AnalysisOutcome, ContributionStats, DashboardReport, Notice, UpstreamBundle,
};
use crate::profile::derive_profile;
use crate::stats::analyze;
use chrono::NaiveDate;

/// Inclusive date bounds applied to a series before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Window {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub fn build_report(
    bundle: UpstreamBundle,
    window: Window,
    as_of: NaiveDate,
    config: &AnalyzerConfig,
) -> Result<DashboardReport, AnalysisError> {
    let series = bundle.series.restrict(window.from, window.to);
    let stats = analyze(&series, as_of, config)?;
    let profile = bundle
        .user
        .as_ref()
        .map(|user| derive_profile(user.created_at, as_of, config));
    let notices = notices_for(&stats, config);

    Ok(DashboardReport {
        stats,
        profile,
        user: bundle.user,
        days: series.days,
        notices,
    })
}

/// Folds a data-source result into the three states the presentation layer
/// has to distinguish. Upstream failures are never reported as empty data.
pub fn assess(
    fetched: Result<UpstreamBundle, UpstreamError>,
    window: Window,
    as_of: NaiveDate,
    config: &AnalyzerConfig,
) -> Result<AnalysisOutcome, AnalysisError> {
    let bundle = match fetched {
        Ok(bundle) => bundle,
        Err(err) => {
            return Ok(AnalysisOutcome::Unavailable {
                reason: err.to_string(),
            });
        }
    };

    let report = build_report(bundle, window, as_of, config)?;
    if report.days.is_empty() {
        Ok(AnalysisOutcome::Empty { report })
    } else {
        Ok(AnalysisOutcome::Ready { report })
    }
}

fn notices_for(stats: &ContributionStats, config: &AnalyzerConfig) -> Vec<Notice> {
    let mut notices = Vec::new();
    let public = stats.public_total.unwrap_or(stats.total);
    let private = stats.private_total.unwrap_or(0);

    if public == 0 && private == 0 {
        notices.push(Notice::NoContributions);
    }
    if private == 0 {
        notices.push(Notice::NoPrivateContributions);
    }
    if stats.active_days < config.low_activity_days {
        notices.push(Notice::LowActivity {
            active_days: stats.active_days,
        });
    }
    if let (Some(latest), Some(as_of)) = (stats.latest_date, stats.as_of) {
        if latest < as_of {
            notices.push(Notice::StaleData { latest });
        }
    }
    notices
}
