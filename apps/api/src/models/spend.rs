use serde::{Deserialize, Serialize};

/// One day of spend data as written by the collector. Every numeric field may
/// be missing from the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendSnapshot {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub daily_spend: Option<f64>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub used: Option<f64>,
}

/// The whole spend log: snapshots in date order plus the collector's
/// last-known top-level figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendLog {
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub last_checked: Option<String>,
    #[serde(default)]
    pub history: Vec<SpendSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_tolerates_missing_fields() {
        let log: SpendLog = serde_json::from_str(
            r#"{"history": [{"date": "2026-10-01", "dailySpend": 4.5}, {}]}"#,
        )
        .unwrap();

        assert_eq!(log.balance, None);
        assert_eq!(log.history.len(), 2);
        assert_eq!(log.history[0].daily_spend, Some(4.5));
        assert_eq!(log.history[1], SpendSnapshot::default());
    }

    #[test]
    fn test_empty_document_is_empty_log() {
        let log: SpendLog = serde_json::from_str("{}").unwrap();
        assert_eq!(log, SpendLog::default());
    }
}
