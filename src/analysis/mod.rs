pub mod extrema;
pub mod session;

pub use extrema::{AnalysisError, EquityExtrema};
pub use session::SessionSummary;
