use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContribution {
    pub date: NaiveDate,
    pub count: u32,
}

impl DailyContribution {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// Totals reported by the upstream calendar, when it reports them separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportedTotals {
    pub public: Option<u64>,
    pub private: Option<u64>,
}

/// An ordered run of daily contributions covering one fetch window, or several
/// windows concatenated. Missing days are absent, never implied zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContributionSeries {
    pub days: Vec<DailyContribution>,
    #[serde(default)]
    pub reported: ReportedTotals,
}

impl ContributionSeries {
    pub fn new(days: Vec<DailyContribution>) -> Self {
        Self {
            days,
            reported: ReportedTotals::default(),
        }
    }

    pub fn with_reported(mut self, reported: ReportedTotals) -> Self {
        self.reported = reported;
        self
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// First and last date of the series, if it has any entries.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.days.first()?.date, self.days.last()?.date))
    }

    /// Joins yearly windows in the order given. Reported totals are only kept
    /// when every window reported them; joining no windows reports none.
    pub fn concat(windows: impl IntoIterator<Item = ContributionSeries>) -> Self {
        let mut days = Vec::new();
        let mut reported: Option<ReportedTotals> = None;
        for window in windows {
            days.extend(window.days);
            reported = Some(match reported {
                None => window.reported,
                Some(acc) => ReportedTotals {
                    public: acc.public.zip(window.reported.public).map(|(a, b)| a + b),
                    private: acc.private.zip(window.reported.private).map(|(a, b)| a + b),
                },
            });
        }
        Self {
            days,
            reported: reported.unwrap_or_default(),
        }
    }

    /// Entries inside the inclusive `[from, to]` window. Either bound may be open.
    /// Reported totals describe the whole upstream window, so a narrowed series
    /// drops them.
    pub fn restrict(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        if from.is_none() && to.is_none() {
            return self.clone();
        }
        let days = self
            .days
            .iter()
            .filter(|day| from.is_none_or(|from| day.date >= from))
            .filter(|day| to.is_none_or(|to| day.date <= to))
            .copied()
            .collect();
        Self::new(days)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContributionStats {
    pub total: u64,
    pub public_total: Option<u64>,
    pub private_total: Option<u64>,
    pub today_count: u32,
    pub today_recorded: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub highest_contribution: u32,
    pub highest_contribution_date: Option<NaiveDate>,
    pub active_days: u32,
    pub yearly_totals: BTreeMap<i32, u64>,
    pub weekday_total: u64,
    pub weekend_total: u64,
    pub as_of: Option<NaiveDate>,
    /// The date the current streak was measured back from.
    pub latest_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub created_at: NaiveDate,
    pub days_since_joined: i64,
    pub recently_joined: bool,
    pub joined_since: String,
}

/// Account metadata passed through from the upstream user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub login: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub repositories: u64,
    pub total_pull_requests: Option<u64>,
    pub total_issues: Option<u64>,
    pub created_at: NaiveDate,
}

/// Everything the data source hands over for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBundle {
    pub series: ContributionSeries,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    NoContributions,
    NoPrivateContributions,
    LowActivity { active_days: u32 },
    StaleData { latest: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub stats: ContributionStats,
    pub profile: Option<AccountProfile>,
    pub user: Option<UserSummary>,
    pub days: Vec<DailyContribution>,
    pub notices: Vec<Notice>,
}

/// Lets callers tell "zero activity" apart from "data unavailable".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Ready { report: DashboardReport },
    Empty { report: DashboardReport },
    Unavailable { reason: String },
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub calendar: serde_json::Value,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReportQuery {
    pub as_of: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
