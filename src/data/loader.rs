use crate::data::sample::{parse_timestamp, EquitySample, SampleError};
use chrono_tz::Tz;
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {path:?}")]
    MissingInput { path: PathBuf },
    #[error("No data to analyze: {path:?} contains zero rows")]
    EmptyInput { path: PathBuf },
    #[error("Malformed row at line {line}: expected 4 fields (timestamp;equity;balance;drawdown), got {count} in '{content}'")]
    WrongFieldCount {
        line: usize,
        count: usize,
        content: String,
    },
    #[error("Malformed timestamp at line {line}: '{value}'")]
    MalformedTimestamp { line: usize, value: String },
    #[error("Malformed {field} value at line {line}: '{value}'")]
    MalformedNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("Invalid sample at line {line}: {source}")]
    InvalidSample {
        line: usize,
        #[source]
        source: SampleError,
    },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

//loads equity samples from a semicolon-delimited headerless csv file
//
//any malformed row fails the whole load with its line number; a partially
//loaded series would silently skew the extrema and the rendered figure
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<EquitySample>, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .flexible(true)
        .from_path(path)?;

    let mut samples = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let line = index + 1;
        let record = result?;

        if record.len() != 4 {
            return Err(LoadError::WrongFieldCount {
                line,
                count: record.len(),
                content: record.iter().collect::<Vec<_>>().join(";"),
            });
        }

        //field 1: timestamp in the sampler's fixed pattern
        let timestamp =
            parse_timestamp(&record[0]).map_err(|_| LoadError::MalformedTimestamp {
                line,
                value: record[0].to_string(),
            })?;

        //fields 2-4: locale-invariant decimals
        let equity = parse_field(&record[1], "equity", line)?;
        let balance = parse_field(&record[2], "balance", line)?;
        let drawdown = parse_field(&record[3], "drawdown", line)?;

        let sample = EquitySample::new(timestamp, equity, balance, drawdown)
            .map_err(|source| LoadError::InvalidSample { line, source })?;

        samples.push(sample);
    }

    if samples.is_empty() {
        return Err(LoadError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    Ok(samples)
}

fn parse_field(raw: &str, field: &'static str, line: usize) -> Result<f64, LoadError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LoadError::MalformedNumber {
            line,
            field,
            value: raw.to_string(),
        })
}

//converts logged timestamps from utc to the wall clock of the given timezone
pub fn localize(samples: &mut [EquitySample], tz: Tz) {
    for sample in samples.iter_mut() {
        sample.timestamp = sample.timestamp.and_utc().with_timezone(&tz).naive_local();
    }
}
