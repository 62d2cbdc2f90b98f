use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorSettings,
    pub output: OutputSettings,
    pub charts: ChartSettings,
    pub logging: LoggingSettings,
}

/// Parameters for the synthetic transaction table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Seed for the random stream. The same seed always yields the same table.
    pub seed: u64,
    /// Number of transactions to generate.
    pub record_count: usize,
    /// First calendar day a transaction may fall on.
    pub start_date: NaiveDate,
    /// Last calendar day a transaction may fall on (inclusive).
    pub end_date: NaiveDate,
}

/// Where the chart images and workbooks are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    /// Data-only workbook.
    pub workbook: String,
    /// Workbook with the four charts embedded.
    pub workbook_with_charts: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Scale applied to each image when it is embedded in the workbook.
    pub image_scale: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// A `tracing` filter directive, e.g. "info" or "exporter=debug".
    pub level: String,
}

impl Config {
    /// Rejects settings that would make the pipeline fail halfway through.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.end_date < self.generator.start_date {
            return Err(ConfigError::ValidationError(format!(
                "generator.end_date ({}) is before generator.start_date ({})",
                self.generator.end_date, self.generator.start_date
            )));
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(ConfigError::ValidationError(
                "charts.width and charts.height must be non-zero".to_string(),
            ));
        }
        if !(self.charts.image_scale > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "charts.image_scale must be positive, got {}",
                self.charts.image_scale
            )));
        }
        if self.output.workbook.trim().is_empty() || self.output.workbook_with_charts.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output workbook names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl OutputSettings {
    pub fn workbook_path(&self) -> PathBuf {
        self.directory.join(&self.workbook)
    }

    pub fn workbook_with_charts_path(&self) -> PathBuf {
        self.directory.join(&self.workbook_with_charts)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

// --- Default Implementations ---
// These reproduce the standard report when no config file is present.

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            record_count: 1000,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            workbook: "Sales_Data_Analysis.xlsx".to_string(),
            workbook_with_charts: "Sales_Data_Analysis_with_Visualizations.xlsx".to_string(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self { width: 1000, height: 600, image_scale: 0.55 }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}
