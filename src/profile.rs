use crate::config::AnalyzerConfig;
use crate::models::AccountProfile;
use chrono::NaiveDate;

pub fn derive_profile(
    created_at: NaiveDate,
    as_of: NaiveDate,
    config: &AnalyzerConfig,
) -> AccountProfile {
    let days_since_joined = (as_of - created_at).num_days();
    AccountProfile {
        created_at,
        days_since_joined,
        recently_joined: days_since_joined < config.recent_join_days,
        joined_since: joined_since(days_since_joined),
    }
}

/// Coarse "time ago" label. Months are counted as 30 days and years as 365.
pub fn joined_since(days: i64) -> String {
    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    }

    match days {
        i64::MIN..=0 => "today".to_string(),
        1..=29 => plural(days, "day"),
        30..=364 => plural(days / 30, "month"),
        _ => plural(days / 365, "year"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn ten_day_old_account_is_recent() {
        let profile = derive_profile(
            as_of() - Duration::days(10),
            as_of(),
            &AnalyzerConfig::default(),
        );
        assert_eq!(profile.days_since_joined, 10);
        assert!(profile.recently_joined);
        assert_eq!(profile.joined_since, "10 days ago");
    }

    #[test]
    fn four_hundred_day_old_account_is_not_recent() {
        let profile = derive_profile(
            as_of() - Duration::days(400),
            as_of(),
            &AnalyzerConfig::default(),
        );
        assert!(!profile.recently_joined);
        assert_eq!(profile.joined_since, "1 year ago");
    }

    #[test]
    fn threshold_is_exclusive_and_configurable() {
        let config = AnalyzerConfig::default();
        let at_threshold = derive_profile(as_of() - Duration::days(60), as_of(), &config);
        assert!(!at_threshold.recently_joined);

        let strict = AnalyzerConfig {
            recent_join_days: 7,
            ..AnalyzerConfig::default()
        };
        assert!(!derive_profile(as_of() - Duration::days(10), as_of(), &strict).recently_joined);
    }

    #[test]
    fn labels() {
        assert_eq!(joined_since(0), "today");
        assert_eq!(joined_since(1), "1 day ago");
        assert_eq!(joined_since(65), "2 months ago");
        assert_eq!(joined_since(365 * 4 + 3), "4 years ago");
    }
}
