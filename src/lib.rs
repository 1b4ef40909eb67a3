//a Rust-based equity log analyzer and chart renderer for trading terminals

pub mod analysis;
pub mod config;
pub mod data;
pub mod plot;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{AnalysisError, EquityExtrema, SessionSummary};
    pub use crate::config::{AnalyzerConfig, FigureSpec};
    pub use crate::data::{
        format_timestamp, load_csv, localize, parse_timestamp, EquitySample, LoadError,
        TIMESTAMP_FORMAT,
    };
    pub use crate::plot::render_combined;
}
