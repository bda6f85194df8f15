//! Session configuration
//!
//! Loaded from TOML; every field is optional.
//!
//! ```toml
//! default_count = 4
//! cell_size = 200
//! mode = "cyclic"
//! max_cells = 4096
//! ```

use multiples_sweep::{
    SweepMode, SweepOptions, DEFAULT_CACHE_CAPACITY, DEFAULT_COLUMNS, DEFAULT_MAX_CELLS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but are inconsistent
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Sweep session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Samples per axis (and grid columns) when no range overrides it
    pub default_count: usize,
    /// Preview cell size in pixels
    pub cell_size: u32,
    /// Smallest accepted cell size
    pub min_cell_size: u32,
    /// Largest accepted cell size
    pub max_cell_size: u32,
    /// How parameters beyond the second are combined
    pub mode: SweepMode,
    /// Upper bound on generated variants
    pub max_cells: usize,
    /// Number of memoized sweeps
    pub cache_capacity: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_COLUMNS,
            cell_size: 200,
            min_cell_size: 50,
            max_cell_size: 400,
            mode: SweepMode::Cyclic,
            max_cells: DEFAULT_MAX_CELLS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl SweepConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns error if the text does not parse or fails [`validate`](Self::validate)
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or its content is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded sweep config");
        Ok(config)
    }

    /// Check value consistency
    ///
    /// # Errors
    /// Returns error for a zero count or cell limit, or inverted cell size bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_count == 0 {
            return Err(ConfigError::Invalid("default_count must be at least 1".into()));
        }
        if self.max_cells == 0 {
            return Err(ConfigError::Invalid("max_cells must be at least 1".into()));
        }
        if self.min_cell_size > self.max_cell_size {
            return Err(ConfigError::Invalid(format!(
                "min_cell_size {} exceeds max_cell_size {}",
                self.min_cell_size, self.max_cell_size
            )));
        }
        Ok(())
    }

    /// With default sample count
    #[inline]
    #[must_use]
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    /// With sweep mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: SweepMode) -> Self {
        self.mode = mode;
        self
    }

    /// With variant limit
    #[inline]
    #[must_use]
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// With cell size, clamped to the configured bounds
    #[inline]
    #[must_use]
    pub fn with_cell_size(mut self, px: u32) -> Self {
        self.cell_size = self.clamp_cell_size(px);
        self
    }

    /// Clamp `px` to `[min_cell_size, max_cell_size]`
    #[inline]
    #[must_use]
    pub fn clamp_cell_size(&self, px: u32) -> u32 {
        px.clamp(self.min_cell_size, self.max_cell_size.max(self.min_cell_size))
    }

    /// Generator options for a grid with `columns` columns
    #[inline]
    #[must_use]
    pub fn sweep_options(&self, columns: usize) -> SweepOptions {
        SweepOptions::default()
            .with_count(columns)
            .with_mode(self.mode)
            .with_max_cells(self.max_cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SweepConfig::from_toml_str("").unwrap(), SweepConfig::default());
    }

    #[test]
    fn parses_partial_config() {
        let config = SweepConfig::from_toml_str(
            r#"
            default_count = 3
            mode = "cross_product"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_count, 3);
        assert_eq!(config.mode, SweepMode::CrossProduct);
        assert_eq!(config.cell_size, 200);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            SweepConfig::from_toml_str("default_count = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SweepConfig::from_toml_str("min_cell_size = 500"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SweepConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn clamps_cell_size() {
        let config = SweepConfig::new();
        assert_eq!(config.clamp_cell_size(10), 50);
        assert_eq!(config.clamp_cell_size(1000), 400);
        assert_eq!(config.with_cell_size(120).cell_size, 120);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_cells = 64").unwrap();
        let config = SweepConfig::load(file.path()).unwrap();
        assert_eq!(config.max_cells, 64);

        let missing = SweepConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
