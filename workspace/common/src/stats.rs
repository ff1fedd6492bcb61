//! Summary numbers and the trend series shown on the history page.

use crate::history::PredictionRecord;
use crate::prediction::RiskLevel;

/// Number of most recent predictions plotted in the trend chart.
pub const TREND_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistorySummary {
    pub total: usize,
    /// Mean probability as a rounded percentage; 0 for an empty history.
    pub average_probability_pct: u32,
    pub high_risk_count: usize,
}

impl HistorySummary {
    pub fn from_records(records: &[PredictionRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let sum: f64 = records.iter().map(|r| r.result.probability).sum();
        let average = sum / records.len() as f64;

        Self {
            total: records.len(),
            average_probability_pct: (average * 100.0).round() as u32,
            high_risk_count: records
                .iter()
                .filter(|r| r.result.risk_level == RiskLevel::High)
                .count(),
        }
    }
}

/// One point of the risk trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// 1-based position, oldest first.
    pub index: usize,
    pub probability_pct: u32,
    /// Short date label such as "Jan 5"; the raw timestamp when unparsable.
    pub label: String,
}

/// The newest `window` records, re-ordered oldest first for plotting.
pub fn trend_points(records: &[PredictionRecord], window: usize) -> Vec<TrendPoint> {
    records
        .iter()
        .take(window)
        .rev()
        .enumerate()
        .map(|(i, record)| TrendPoint {
            index: i + 1,
            probability_pct: (record.result.probability * 100.0).round() as u32,
            label: record
                .parsed_timestamp()
                .map(|dt| dt.format("%b %-d").to_string())
                .unwrap_or_else(|| record.timestamp.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::RecordedResult;
    use crate::prediction::PredictionInput;

    fn record(id: usize, probability: f64, risk_level: RiskLevel) -> PredictionRecord {
        PredictionRecord {
            id: format!("r{id}"),
            timestamp: format!("2024-02-{:02}T10:00:00Z", id),
            input: PredictionInput::default(),
            result: RecordedResult {
                prediction: u8::from(probability >= 0.5),
                probability,
                risk_level,
            },
        }
    }

    #[test]
    fn test_summary_of_empty_history() {
        assert_eq!(HistorySummary::from_records(&[]), HistorySummary::default());
    }

    #[test]
    fn test_summary() {
        let records = vec![
            record(3, 0.9, RiskLevel::High),
            record(2, 0.4, RiskLevel::Moderate),
            record(1, 0.05, RiskLevel::Low),
        ];
        let summary = HistorySummary::from_records(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.average_probability_pct, 45);
        assert_eq!(summary.high_risk_count, 1);
    }

    #[test]
    fn test_trend_takes_newest_and_orders_oldest_first() {
        // Stored most recent first: r12 .. r1
        let records: Vec<PredictionRecord> = (1..=12)
            .rev()
            .map(|i| record(i, i as f64 / 100.0, RiskLevel::Low))
            .collect();

        let points = trend_points(&records, TREND_WINDOW);
        assert_eq!(points.len(), 10);
        assert_eq!(points[0].index, 1);
        assert_eq!(points[0].probability_pct, 3);
        assert_eq!(points[0].label, "Feb 3");
        assert_eq!(points[9].probability_pct, 12);
        assert_eq!(points[9].label, "Feb 12");
    }

    #[test]
    fn test_trend_label_falls_back_to_raw_timestamp() {
        let mut r = record(1, 0.2, RiskLevel::Low);
        r.timestamp = "not a date".to_string();
        assert_eq!(trend_points(&[r], 10)[0].label, "not a date");
    }
}
