use crate::constants::{DEFAULT_MARGIN_PT, DEFAULT_PAGES_PER_SHEET};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output sheet configuration: paper size and the gap around and between cells.
///
/// Orientation is not part of the configuration; it is chosen per layout by
/// [`compute_geometry`](crate::compute_geometry).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetConfig {
    pub paper: PaperSize,
    pub margin_pt: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margin_pt: DEFAULT_MARGIN_PT,
        }
    }
}

impl SheetConfig {
    /// Load a sheet configuration from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| MergeError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the sheet configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| MergeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.margin_pt.is_finite() || self.margin_pt < 0.0 {
            return Err(MergeError::Config(format!(
                "Margin must be a non-negative number of points, got {}",
                self.margin_pt
            )));
        }

        let (width, height) = self.paper.dimensions_pt();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MergeError::Config(format!(
                "Paper size must be positive, got {} x {}",
                width, height
            )));
        }

        Ok(())
    }
}

/// Merge configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeOptions {
    /// Number of invoices placed on each output sheet
    pub pages_per_sheet: usize,
    /// Compose files in descending name order
    pub reverse: bool,
    pub sheet: SheetConfig,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            pages_per_sheet: DEFAULT_PAGES_PER_SHEET,
            reverse: false,
            sheet: SheetConfig::default(),
        }
    }
}

impl MergeOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.pages_per_sheet == 0 {
            return Err(MergeError::Config(
                "Pages per sheet must be at least 1".to_string(),
            ));
        }

        self.sheet.validate()
    }
}
