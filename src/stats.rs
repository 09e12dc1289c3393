use crate::config::AnalyzerConfig;
use crate::errors::AnalysisError;
use crate::models::{ContributionSeries, ContributionStats, ReportedTotals};
use chrono::{Datelike, NaiveDate};

/// Derives streaks, highlights and period totals from `series` in one ascending
/// pass.
///
/// A streak is broken by an explicit zero or by a missing day between two
/// entries. The current streak is the run ending at the last entry on or
/// before `as_of`, which is reported as `latest_date` so callers can tell when
/// it is not `as_of`. Entries after `as_of` still count towards totals and the
/// longest streak. An empty series yields zeroed stats; entries that repeat or
/// go back in time are rejected.
pub fn analyze(
    series: &ContributionSeries,
    as_of: NaiveDate,
    config: &AnalyzerConfig,
) -> Result<ContributionStats, AnalysisError> {
    let mut stats = ContributionStats {
        as_of: Some(as_of),
        ..ContributionStats::default()
    };
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for (index, day) in series.days.iter().enumerate() {
        if let Some(previous) = previous {
            if day.date <= previous {
                return Err(AnalysisError::MalformedSeries {
                    index,
                    date: day.date,
                    previous,
                });
            }
            if previous.succ_opt() != Some(day.date) {
                run = 0;
            }
        }

        let count = u64::from(day.count);
        stats.total += count;
        *stats.yearly_totals.entry(day.date.year()).or_default() += count;
        if config.is_weekend(day.date.weekday()) {
            stats.weekend_total += count;
        } else {
            stats.weekday_total += count;
        }

        if day.count > 0 {
            run += 1;
            stats.active_days += 1;
            stats.longest_streak = stats.longest_streak.max(run);
        } else {
            run = 0;
        }

        if day.count > stats.highest_contribution {
            stats.highest_contribution = day.count;
            stats.highest_contribution_date = Some(day.date);
        }

        if day.date == as_of {
            stats.today_count = day.count;
            stats.today_recorded = true;
        }
        if day.date <= as_of {
            stats.current_streak = run;
            stats.latest_date = Some(day.date);
        }

        previous = Some(day.date);
    }

    (stats.public_total, stats.private_total) = split_visibility(stats.total, series.reported);

    Ok(stats)
}

/// The upstream calendar reports the private share directly; when it only
/// reports a public figure the private one is what remains of the total. A
/// reported share larger than the summed days leaves both unknown.
fn split_visibility(total: u64, reported: ReportedTotals) -> (Option<u64>, Option<u64>) {
    match (reported.public, reported.private) {
        (_, Some(private)) => match total.checked_sub(private) {
            Some(public) => (Some(public), Some(private)),
            None => (None, None),
        },
        (Some(public), None) => match total.checked_sub(public) {
            Some(private) => (Some(public), Some(private)),
            None => (None, None),
        },
        (None, None) => (None, None),
    }
}
