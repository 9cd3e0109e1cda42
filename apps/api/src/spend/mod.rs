//! Spend analytics — rolling statistics over the collector's daily log.
//!
//! A pure read-time projection: the log is read whole on every call and never
//! written here, so concurrent summaries need no coordination.

pub mod handlers;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::spend::{SpendLog, SpendSnapshot};
use crate::store::{SpendLogError, SpendLogReader};

const WEEK_WINDOW: usize = 7;
const CHART_WINDOW: usize = 30;
/// Linear month used for projection; not calendar-aware.
const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub spend: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendSummary {
    pub balance: Option<f64>,
    pub used: Option<f64>,
    pub daily_spend: f64,
    pub weekly_avg: f64,
    pub projected_monthly: f64,
    pub chart_data: Vec<ChartPoint>,
    pub last_checked: Option<String>,
}

pub struct SpendAggregator {
    log: Arc<dyn SpendLogReader>,
}

impl SpendAggregator {
    pub fn new(log: Arc<dyn SpendLogReader>) -> Self {
        Self { log }
    }

    pub async fn summarize(&self) -> Result<SpendSummary, SpendLogError> {
        let log = self.log.read_all().await?;
        Ok(summarize_log(&log))
    }
}

pub fn summarize_log(log: &SpendLog) -> SpendSummary {
    let history = &log.history;
    let empty = SpendSnapshot::default();
    let latest = history.last().unwrap_or(&empty);

    let last7 = tail(history, WEEK_WINDOW);
    let weekly_avg = if last7.len() > 1 {
        last7.iter().map(spend_of).sum::<f64>() / last7.len() as f64
    } else {
        // A single sample is not an average.
        spend_of(latest)
    };

    let chart_data = tail(history, CHART_WINDOW)
        .iter()
        .map(|s| ChartPoint {
            date: s.date.clone().unwrap_or_default(),
            spend: spend_of(s),
            balance: s.balance.unwrap_or(0.0),
        })
        .collect();

    SpendSummary {
        balance: latest.balance.or(log.balance),
        used: latest.used,
        daily_spend: spend_of(latest),
        weekly_avg,
        projected_monthly: weekly_avg * DAYS_PER_MONTH,
        chart_data,
        last_checked: log.last_checked.clone().or_else(|| latest.date.clone()),
    }
}

fn tail(history: &[SpendSnapshot], n: usize) -> &[SpendSnapshot] {
    &history[history.len().saturating_sub(n)..]
}

fn spend_of(snapshot: &SpendSnapshot) -> f64 {
    snapshot.daily_spend.unwrap_or(0.0)
}
