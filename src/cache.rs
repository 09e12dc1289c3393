use crate::models::DashboardReport;
use crate::report::Window;
use chrono::NaiveDate;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub account: String,
    pub window: Window,
    pub as_of: NaiveDate,
}

/// Reports memoized per account, window and day. Stored entries are never
/// replaced; when full, the entry with the oldest `as_of` goes first.
#[derive(Clone)]
pub struct ReportCache {
    capacity: usize,
    entries: Arc<Mutex<HashMap<ReportKey, Arc<DashboardReport>>>>,
}

impl ReportCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &ReportKey) -> Option<Arc<DashboardReport>> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Returns the stored entry, which is the existing one if another request
    /// got there first.
    pub async fn insert(&self, key: ReportKey, report: DashboardReport) -> Arc<DashboardReport> {
        let mut entries = self.entries.lock().await;
        if let Some(existing) = entries.get(&key) {
            return Arc::clone(existing);
        }
        if self.capacity == 0 {
            return Arc::new(report);
        }
        if entries.len() >= self.capacity {
            let oldest = entries
                .keys()
                .min_by_key(|key| key.as_of)
                .cloned();
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        let report = Arc::new(report);
        entries.insert(key, Arc::clone(&report));
        report
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
