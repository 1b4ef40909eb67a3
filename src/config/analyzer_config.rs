use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

//figure dimensions in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FigureSpec {
    pub width: u32,
    pub height: u32,
}

impl Default for FigureSpec {
    fn default() -> Self {
        FigureSpec {
            width: 1600,
            height: 800,
        }
    }
}

//complete analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    //equity log to analyze
    pub input_path: PathBuf,

    //where the rendered figure is written
    pub output_path: PathBuf,

    //optional iana timezone name; when set, logged timestamps are treated
    //as utc and converted to this zone's wall clock
    pub timezone: Option<String>,

    //figure dimensions
    pub figure: FigureSpec,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            input_path: PathBuf::from("EquityLog.csv"),
            output_path: PathBuf::from("equity_analysis.png"),
            timezone: None,
            figure: FigureSpec::default(),
        }
    }
}

impl AnalyzerConfig {
    //load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AnalyzerConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
