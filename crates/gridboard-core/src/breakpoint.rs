//! Viewport tiers and their grid column counts.
//!
//! A board is laid out against the column count of one [`Breakpoint`] at a
//! time. The defaults here can be overridden through the library's grid
//! configuration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A named viewport-width tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl Breakpoint {
    /// All breakpoints, narrowest first.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];

    /// Default number of grid columns for this breakpoint
    pub fn default_columns(self) -> u32 {
        match self {
            Breakpoint::Mobile => 2,
            Breakpoint::Tablet => 4,
            Breakpoint::Desktop => 8,
        }
    }

    /// Default minimum viewport width, in pixels, at which this breakpoint applies
    pub fn default_min_width(self) -> u32 {
        match self {
            Breakpoint::Mobile => 0,
            Breakpoint::Tablet => 640,
            Breakpoint::Desktop => 1024,
        }
    }

    /// Returns the lowercase name used in configuration and layout files
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| bp.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown breakpoint `{s}` (expected mobile, tablet or desktop)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns_grow_with_width() {
        let columns: Vec<_> = Breakpoint::ALL.iter().map(|bp| bp.default_columns()).collect();
        assert_eq!(columns, vec![2, 4, 8]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("tablet".parse::<Breakpoint>(), Ok(Breakpoint::Tablet));
        assert_eq!("Desktop".parse::<Breakpoint>(), Ok(Breakpoint::Desktop));
        assert!("watch".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for bp in Breakpoint::ALL {
            assert_eq!(bp.to_string().parse::<Breakpoint>(), Ok(bp));
        }
    }
}
