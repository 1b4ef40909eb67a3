use crate::data::EquitySample;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cannot analyze an empty equity series")]
    EmptySeries,
}

//the equity extremes of a series and when each first occurred
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquityExtrema {
    pub max_equity: f64,
    pub max_equity_time: NaiveDateTime,
    pub min_equity: f64,
    pub min_equity_time: NaiveDateTime,
}

impl EquityExtrema {
    //computes the extrema of a series; ties resolve to the earliest sample
    pub fn from_samples(samples: &[EquitySample]) -> Result<Self, AnalysisError> {
        let first = samples.first().ok_or(AnalysisError::EmptySeries)?;

        let mut max_equity = first.equity;
        let mut max_equity_time = first.timestamp;
        let mut min_equity = first.equity;
        let mut min_equity_time = first.timestamp;

        //strict comparisons keep the first occurrence on ties
        for sample in &samples[1..] {
            if sample.equity > max_equity {
                max_equity = sample.equity;
                max_equity_time = sample.timestamp;
            }
            if sample.equity < min_equity {
                min_equity = sample.equity;
                min_equity_time = sample.timestamp;
            }
        }

        Ok(EquityExtrema {
            max_equity,
            max_equity_time,
            min_equity,
            min_equity_time,
        })
    }

    //returns the spread between the highest and lowest equity
    pub fn range(&self) -> f64 {
        self.max_equity - self.min_equity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_timestamp;

    fn sample(ts: &str, equity: f64) -> EquitySample {
        EquitySample::new_unchecked(parse_timestamp(ts).unwrap(), equity, equity, 0.0)
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = EquityExtrema::from_samples(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptySeries));
    }

    #[test]
    fn finds_extrema_and_their_timestamps() {
        let samples = vec![
            sample("2025.09.16 17:59:25", 2925.82),
            sample("2025.09.16 17:59:26", 2925.60),
            sample("2025.09.16 17:59:27", 2926.15),
        ];

        let extrema = EquityExtrema::from_samples(&samples).unwrap();
        assert_eq!(extrema.max_equity, 2926.15);
        assert_eq!(extrema.max_equity_time, samples[2].timestamp);
        assert_eq!(extrema.min_equity, 2925.60);
        assert_eq!(extrema.min_equity_time, samples[1].timestamp);
        assert!(extrema.max_equity >= extrema.min_equity);
    }

    #[test]
    fn ties_resolve_to_the_earliest_sample() {
        let samples = vec![
            sample("2025.09.16 10:00:00", 3000.0),
            sample("2025.09.16 10:00:01", 2990.0),
            sample("2025.09.16 10:00:02", 3000.0),
            sample("2025.09.16 10:00:03", 2990.0),
        ];

        let extrema = EquityExtrema::from_samples(&samples).unwrap();
        assert_eq!(extrema.max_equity_time, samples[0].timestamp);
        assert_eq!(extrema.min_equity_time, samples[1].timestamp);
    }

    #[test]
    fn single_sample_extrema_coincide() {
        let samples = vec![sample("2025.09.16 17:59:25", 2925.82)];

        let extrema = EquityExtrema::from_samples(&samples).unwrap();
        assert_eq!(extrema.max_equity, 2925.82);
        assert_eq!(extrema.min_equity, 2925.82);
        assert_eq!(extrema.max_equity_time, extrema.min_equity_time);
        assert_eq!(extrema.range(), 0.0);
    }

    #[test]
    fn analysis_is_deterministic() {
        let samples = vec![
            sample("2025.09.16 17:59:25", 2925.82),
            sample("2025.09.16 17:59:26", 2925.60),
            sample("2025.09.16 17:59:27", 2926.15),
        ];

        let first = EquityExtrema::from_samples(&samples).unwrap();
        let second = EquityExtrema::from_samples(&samples).unwrap();
        assert_eq!(first, second);
    }
}
