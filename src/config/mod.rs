pub mod analyzer_config;

pub use analyzer_config::{AnalyzerConfig, FigureSpec};
