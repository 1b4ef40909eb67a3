use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//fixed textual pattern the sampler writes timestamps in
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Non-finite equity value: {0}")]
    NonFiniteEquity(f64),
    #[error("Non-finite balance value: {0}")]
    NonFiniteBalance(f64),
    #[error("Non-finite drawdown value: {0}")]
    NonFiniteDrawdown(f64),
    #[error("Negative drawdown: {0}")]
    NegativeDrawdown(f64),
}

//represents one row of the equity log: a snapshot of the account at an instant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquitySample {
    pub timestamp: NaiveDateTime,
    pub equity: f64,
    pub balance: f64,
    pub drawdown: f64,
}

impl EquitySample {
    //creates a new EquitySample with validation
    pub fn new(
        timestamp: NaiveDateTime,
        equity: f64,
        balance: f64,
        drawdown: f64,
    ) -> Result<Self, SampleError> {
        //validate all fields are finite numbers
        if !equity.is_finite() {
            return Err(SampleError::NonFiniteEquity(equity));
        }

        if !balance.is_finite() {
            return Err(SampleError::NonFiniteBalance(balance));
        }

        if !drawdown.is_finite() {
            return Err(SampleError::NonFiniteDrawdown(drawdown));
        }

        //drawdown is a decimal fraction of decline from peak, never negative
        if drawdown < 0.0 {
            return Err(SampleError::NegativeDrawdown(drawdown));
        }

        Ok(EquitySample {
            timestamp,
            equity,
            balance,
            drawdown,
        })
    }

    //creates an EquitySample without validation
    pub fn new_unchecked(
        timestamp: NaiveDateTime,
        equity: f64,
        balance: f64,
        drawdown: f64,
    ) -> Self {
        EquitySample {
            timestamp,
            equity,
            balance,
            drawdown,
        }
    }

    //returns the floating loss (balance - equity); positive when open positions lose
    pub fn floating_loss(&self) -> f64 {
        self.balance - self.equity
    }

    //returns the unrealized p&l (equity - balance)
    pub fn unrealized_pnl(&self) -> f64 {
        self.equity - self.balance
    }
}

//parses a timestamp in the sampler's fixed pattern
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

//formats a timestamp back into the sampler's fixed pattern
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn valid_sample_constructs() {
        let sample = EquitySample::new(ts("2025.09.16 17:59:25"), 2925.82, 2928.54, 0.0).unwrap();
        assert_eq!(sample.equity, 2925.82);
        assert_eq!(sample.balance, 2928.54);
        assert_eq!(sample.drawdown, 0.0);
    }

    #[test]
    fn negative_drawdown_rejected() {
        let result = EquitySample::new(ts("2025.09.16 17:59:25"), 2925.82, 2928.54, -0.01);
        assert!(matches!(result, Err(SampleError::NegativeDrawdown(_))));
    }

    #[test]
    fn non_finite_equity_rejected() {
        let result = EquitySample::new(ts("2025.09.16 17:59:25"), f64::NAN, 2928.54, 0.0);
        assert!(matches!(result, Err(SampleError::NonFiniteEquity(_))));
    }

    #[test]
    fn floating_loss_is_balance_minus_equity() {
        let sample =
            EquitySample::new_unchecked(ts("2025.09.16 17:59:25"), 2925.82, 2928.54, 0.0);
        assert!((sample.floating_loss() - 2.72).abs() < 1e-9);
        assert!((sample.unrealized_pnl() + 2.72).abs() < 1e-9);
    }

    #[test]
    fn timestamp_round_trips_through_fixed_pattern() {
        let raw = "2025.09.16 17:59:25";
        let parsed = parse_timestamp(raw).unwrap();
        assert_eq!(format_timestamp(parsed), raw);
    }

    #[test]
    fn malformed_timestamp_fails_to_parse() {
        assert!(parse_timestamp("2025-09-16 17:59:25").is_err());
        assert!(parse_timestamp("not a timestamp").is_err());
    }
}
