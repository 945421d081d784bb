//! Configuration types for Gridboard ordering and placement.
//!
//! This module provides configuration structures that control how order keys
//! are spaced and how many columns each breakpoint offers. All types
//! implement [`serde::Deserialize`] and fall back to defaults for any field
//! that is not set, so a partial TOML file is enough.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining ordering and grid settings.
//! - [`OrderingConfig`] - Gap, minimum key and reorganization threshold for order keys.
//! - [`GridConfig`] - Column counts and viewport thresholds for each [`Breakpoint`].
//!
//! # Example
//!
//! ```
//! # use gridboard::config::AppConfig;
//! # use gridboard_core::breakpoint::Breakpoint;
//! let config = AppConfig::default();
//! assert_eq!(config.ordering().gap(), 1000);
//! assert_eq!(config.grid().columns(Breakpoint::Desktop), 8);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use gridboard_core::breakpoint::Breakpoint;

/// Top-level configuration combining ordering and grid settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Order key configuration section.
    #[serde(default)]
    ordering: OrderingConfig,

    /// Grid configuration section.
    #[serde(default)]
    grid: GridConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified ordering and grid configurations.
    pub fn new(ordering: OrderingConfig, grid: GridConfig) -> Self {
        Self { ordering, grid }
    }

    /// Returns the ordering configuration.
    pub fn ordering(&self) -> &OrderingConfig {
        &self.ordering
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Checks every section for values the algorithms cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.ordering.validate()?;
        self.grid.validate()
    }
}

/// Spacing of order keys.
///
/// New widgets appended at the end receive `last + gap`; a reorganized
/// board receives `min_key, min_key + gap, min_key + 2 * gap, …`. When two
/// adjacent keys are closer than `min_spacing` the board should be
/// reorganized before more insertions are attempted between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    gap: i64,
    min_key: i64,
    min_spacing: i64,
}

impl OrderingConfig {
    /// Creates an ordering configuration.
    ///
    /// # Arguments
    ///
    /// * `gap` - Distance between keys of a freshly reorganized board.
    /// * `min_key` - Smallest key ever handed out.
    /// * `min_spacing` - Adjacent keys closer than this trigger reorganization.
    pub fn new(gap: i64, min_key: i64, min_spacing: i64) -> Self {
        Self {
            gap,
            min_key,
            min_spacing,
        }
    }

    pub fn gap(&self) -> i64 {
        self.gap
    }

    pub fn min_key(&self) -> i64 {
        self.min_key
    }

    pub fn min_spacing(&self) -> i64 {
        self.min_spacing
    }

    /// Checks that a midpoint insertion always fits into a fresh gap.
    ///
    /// # Errors
    ///
    /// Returns an error if `gap` or `min_spacing` is below 2.
    pub fn validate(&self) -> Result<(), String> {
        if self.gap < 2 {
            return Err(format!("ordering.gap must be at least 2, got {}", self.gap));
        }
        if self.min_spacing < 2 {
            return Err(format!(
                "ordering.min_spacing must be at least 2, got {}",
                self.min_spacing
            ));
        }
        Ok(())
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self::new(1000, 0, 2)
    }
}

/// Column counts and viewport thresholds for each [`Breakpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    mobile_columns: u32,
    tablet_columns: u32,
    desktop_columns: u32,
    tablet_min_width: u32,
    desktop_min_width: u32,
}

impl GridConfig {
    /// Returns the number of grid columns available at `breakpoint`.
    pub fn columns(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Mobile => self.mobile_columns,
            Breakpoint::Tablet => self.tablet_columns,
            Breakpoint::Desktop => self.desktop_columns,
        }
    }

    /// Returns the minimum viewport width, in pixels, for `breakpoint`.
    pub fn min_width(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Mobile => 0,
            Breakpoint::Tablet => self.tablet_min_width,
            Breakpoint::Desktop => self.desktop_min_width,
        }
    }

    /// Picks the widest breakpoint whose minimum width fits `viewport_width`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridboard::config::GridConfig;
    /// # use gridboard_core::breakpoint::Breakpoint;
    /// let grid = GridConfig::default();
    /// assert_eq!(grid.breakpoint_for_width(320), Breakpoint::Mobile);
    /// assert_eq!(grid.breakpoint_for_width(800), Breakpoint::Tablet);
    /// assert_eq!(grid.breakpoint_for_width(1920), Breakpoint::Desktop);
    /// ```
    pub fn breakpoint_for_width(&self, viewport_width: u32) -> Breakpoint {
        Breakpoint::ALL
            .into_iter()
            .rev()
            .find(|bp| viewport_width >= self.min_width(*bp))
            .unwrap_or(Breakpoint::Mobile)
    }

    /// Checks that every breakpoint has columns and the thresholds ascend.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        for bp in Breakpoint::ALL {
            if self.columns(bp) == 0 {
                return Err(format!("grid.{bp}_columns must be at least 1"));
            }
        }
        if self.tablet_min_width >= self.desktop_min_width {
            return Err(format!(
                "grid.tablet_min_width ({}) must be below grid.desktop_min_width ({})",
                self.tablet_min_width, self.desktop_min_width
            ));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            mobile_columns: Breakpoint::Mobile.default_columns(),
            tablet_columns: Breakpoint::Tablet.default_columns(),
            desktop_columns: Breakpoint::Desktop.default_columns(),
            tablet_min_width: Breakpoint::Tablet.default_min_width(),
            desktop_min_width: Breakpoint::Desktop.default_min_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ordering]
            gap = 64

            [grid]
            desktop_columns = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.ordering().gap(), 64);
        assert_eq!(config.ordering().min_key(), 0);
        assert_eq!(config.ordering().min_spacing(), 2);
        assert_eq!(config.grid().columns(Breakpoint::Desktop), 12);
        assert_eq!(config.grid().columns(Breakpoint::Mobile), 2);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(*config.ordering(), OrderingConfig::default());
        assert_eq!(*config.grid(), GridConfig::default());
    }

    #[test]
    fn test_rejects_tiny_gap() {
        let config = OrderingConfig::new(1, 0, 2);
        assert!(config.validate().unwrap_err().contains("ordering.gap"));
    }

    #[test]
    fn test_rejects_tiny_min_spacing() {
        let config = OrderingConfig::new(1000, 0, 1);
        assert!(config.validate().unwrap_err().contains("min_spacing"));
    }

    #[test]
    fn test_rejects_zero_columns() {
        let config: AppConfig = toml::from_str("[grid]\nmobile_columns = 0").unwrap();
        assert_eq!(
            config.validate().unwrap_err(),
            "grid.mobile_columns must be at least 1"
        );
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let config: AppConfig =
            toml::from_str("[grid]\ntablet_min_width = 1200\ndesktop_min_width = 1000").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_breakpoint_thresholds_are_inclusive() {
        let grid = GridConfig::default();
        assert_eq!(grid.breakpoint_for_width(639), Breakpoint::Mobile);
        assert_eq!(grid.breakpoint_for_width(640), Breakpoint::Tablet);
        assert_eq!(grid.breakpoint_for_width(1023), Breakpoint::Tablet);
        assert_eq!(grid.breakpoint_for_width(1024), Breakpoint::Desktop);
    }
}
