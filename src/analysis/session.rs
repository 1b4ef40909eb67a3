use crate::analysis::extrema::AnalysisError;
use crate::data::{format_timestamp, EquitySample};
use chrono::NaiveDateTime;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//per-session statistics for one loaded equity log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub sample_count: usize,
    pub initial_balance: f64,
    pub final_balance: f64,
    pub session_gain: f64,
    pub max_balance: f64,
    pub min_equity: f64,
    pub max_floating_loss: f64,
    pub max_floating_loss_time: NaiveDateTime,
    pub mean_drawdown: f64,
    pub peak_drawdown: f64,
}

impl SessionSummary {
    //calculate session statistics from the loaded series
    pub fn from_samples(samples: &[EquitySample]) -> Result<Self, AnalysisError> {
        let first = samples.first().ok_or(AnalysisError::EmptySeries)?;
        let last = samples.last().ok_or(AnalysisError::EmptySeries)?;

        let initial_balance = first.balance;
        let final_balance = last.balance;
        let session_gain = final_balance - initial_balance;

        let mut max_balance = first.balance;
        let mut min_equity = first.equity;
        let mut max_floating_loss = first.floating_loss();
        let mut max_floating_loss_time = first.timestamp;

        //first occurrence wins on ties, as with the equity extrema
        for sample in &samples[1..] {
            if sample.balance > max_balance {
                max_balance = sample.balance;
            }
            if sample.equity < min_equity {
                min_equity = sample.equity;
            }
            if sample.floating_loss() > max_floating_loss {
                max_floating_loss = sample.floating_loss();
                max_floating_loss_time = sample.timestamp;
            }
        }

        let drawdowns: Vec<f64> = samples.iter().map(|s| s.drawdown).collect();
        let mean_drawdown = drawdowns.as_slice().mean();
        let peak_drawdown = drawdowns.iter().copied().fold(0.0f64, f64::max);

        Ok(SessionSummary {
            start_time: first.timestamp,
            end_time: last.timestamp,
            sample_count: samples.len(),
            initial_balance,
            final_balance,
            session_gain,
            max_balance,
            min_equity,
            max_floating_loss,
            max_floating_loss_time,
            mean_drawdown,
            peak_drawdown,
        })
    }

    //prints the summary in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Session Start"),
            Cell::new(&format_timestamp(self.start_time)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Session End"),
            Cell::new(&format_timestamp(self.end_time)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Samples"),
            Cell::new(&format!("{}", self.sample_count)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Initial Balance"),
            Cell::new(&format!("${:.2}", self.initial_balance)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Balance"),
            Cell::new(&format!("${:.2}", self.final_balance)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Session Gain/Loss"),
            Cell::new(&format!("${:.2}", self.session_gain)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Balance"),
            Cell::new(&format!("${:.2}", self.max_balance)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Min Equity"),
            Cell::new(&format!("${:.2}", self.min_equity)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Floating Loss"),
            Cell::new(&format!(
                "${:.2} at {}",
                self.max_floating_loss,
                format_timestamp(self.max_floating_loss_time)
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Mean Drawdown"),
            Cell::new(&format!("{:.2}%", self.mean_drawdown * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Peak Drawdown"),
            Cell::new(&format!("{:.2}%", self.peak_drawdown * 100.0)),
        ]));

        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_timestamp;

    fn sample(ts: &str, equity: f64, balance: f64, drawdown: f64) -> EquitySample {
        EquitySample::new_unchecked(parse_timestamp(ts).unwrap(), equity, balance, drawdown)
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = SessionSummary::from_samples(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptySeries));
    }

    #[test]
    fn computes_balances_and_gain() {
        let samples = vec![
            sample("2025.09.16 17:59:25", 2925.82, 2928.54, 0.0),
            sample("2025.09.16 17:59:26", 2925.60, 2928.54, 0.0075),
            sample("2025.09.16 17:59:27", 2926.15, 2930.10, 0.0),
        ];

        let summary = SessionSummary::from_samples(&samples).unwrap();
        assert_eq!(summary.sample_count, 3);
        assert_eq!(summary.initial_balance, 2928.54);
        assert_eq!(summary.final_balance, 2930.10);
        assert!((summary.session_gain - 1.56).abs() < 1e-9);
        assert_eq!(summary.max_balance, 2930.10);
        assert_eq!(summary.min_equity, 2925.60);
    }

    #[test]
    fn tracks_max_floating_loss_and_its_time() {
        let samples = vec![
            sample("2025.09.16 17:59:25", 2925.82, 2928.54, 0.0),
            sample("2025.09.16 17:59:26", 2920.00, 2928.54, 0.0075),
            sample("2025.09.16 17:59:27", 2926.15, 2928.54, 0.0),
        ];

        let summary = SessionSummary::from_samples(&samples).unwrap();
        assert!((summary.max_floating_loss - 8.54).abs() < 1e-9);
        assert_eq!(summary.max_floating_loss_time, samples[1].timestamp);
    }

    #[test]
    fn drawdown_statistics_cover_the_whole_series() {
        let samples = vec![
            sample("2025.09.16 17:59:25", 100.0, 100.0, 0.0),
            sample("2025.09.16 17:59:26", 95.0, 100.0, 0.05),
            sample("2025.09.16 17:59:27", 99.0, 100.0, 0.01),
        ];

        let summary = SessionSummary::from_samples(&samples).unwrap();
        assert!((summary.mean_drawdown - 0.02).abs() < 1e-9);
        assert_eq!(summary.peak_drawdown, 0.05);
    }

    #[test]
    fn single_sample_session_is_degenerate_but_valid() {
        let samples = vec![sample("2025.09.16 17:59:25", 2925.82, 2928.54, 0.0)];

        let summary = SessionSummary::from_samples(&samples).unwrap();
        assert_eq!(summary.start_time, summary.end_time);
        assert_eq!(summary.session_gain, 0.0);
        assert_eq!(summary.peak_drawdown, 0.0);
    }
}
