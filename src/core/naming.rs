//! core/naming.rs — filename contract between design tables and rendered images.
//!
//! Both stages go through these types; nothing else formats stimulus names.
//!
//! - numerosity: `s_{level}_r_{realization}.png` (realization is 1-based)
//! - White's illusion: `white_{lum_left}_{lum_right}_{c_left}_{c_right}.png`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::levels::{format_context, format_level};
use crate::error::StimError;

const PNG: &str = ".png";

/// One pre-rendered dot cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DotCloudName {
    pub level: u32,
    pub realization: u32,
}

impl DotCloudName {
    pub fn new(level: u32, realization: u32) -> Self {
        Self { level, realization }
    }
}

impl fmt::Display for DotCloudName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s_{}_r_{}{PNG}", self.level, self.realization)
    }
}

impl FromStr for DotCloudName {
    type Err = StimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || StimError::MalformedName(s.to_string());
        let stem = s.strip_suffix(PNG).ok_or_else(bad)?;
        let rest = stem.strip_prefix("s_").ok_or_else(bad)?;
        let (level, realization) = rest.split_once("_r_").ok_or_else(bad)?;
        let level = level.parse::<u32>().map_err(|_| bad())?;
        let realization = realization.parse::<u32>().map_err(|_| bad())?;
        if realization == 0 {
            return Err(bad());
        }
        Ok(Self { level, realization })
    }
}

/// One White's illusion image, left/right as displayed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhiteName {
    pub lum_left: f64,
    pub lum_right: f64,
    pub context_left: u8,
    pub context_right: u8,
}

impl WhiteName {
    /// Same targets, sides exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            lum_left: self.lum_right,
            lum_right: self.lum_left,
            context_left: self.context_right,
            context_right: self.context_left,
        }
    }
}

impl fmt::Display for WhiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "white_{}_{}_{}_{}{PNG}",
            format_level(self.lum_left),
            format_level(self.lum_right),
            format_context(self.context_left),
            format_context(self.context_right),
        )
    }
}

impl FromStr for WhiteName {
    type Err = StimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || StimError::MalformedName(s.to_string());
        let stem = s.strip_suffix(PNG).ok_or_else(bad)?;
        let rest = stem.strip_prefix("white_").ok_or_else(bad)?;
        let parts: Vec<&str> = rest.split('_').collect();
        let &[l1, l2, c1, c2] = parts.as_slice() else {
            return Err(bad());
        };
        let lum = |p: &str| p.parse::<f64>().ok().filter(|x| x.is_finite());
        let ctx = |p: &str| match p {
            "0.0" => Some(0u8),
            "1.0" => Some(1u8),
            _ => None,
        };
        let name = Self {
            lum_left: lum(l1).ok_or_else(bad)?,
            lum_right: lum(l2).ok_or_else(bad)?,
            context_left: ctx(c1).ok_or_else(bad)?,
            context_right: ctx(c2).ok_or_else(bad)?,
        };
        // Reject spellings the encoder would never produce ("0.50", "5e-1").
        if name.to_string() != s {
            return Err(bad());
        }
        Ok(name)
    }
}

/// Prepend the table prefix (e.g. `imgs/`) to a bare filename.
pub fn with_prefix(prefix: &str, name: &impl fmt::Display) -> String {
    format!("{prefix}{name}")
}

/// Inverse of [`with_prefix`]; names without the prefix pass through.
pub fn strip_prefix<'a>(prefix: &str, reference: &'a str) -> &'a str {
    reference.strip_prefix(prefix).unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_cloud_names() {
        let name = DotCloudName::new(40, 7);
        assert_eq!(name.to_string(), "s_40_r_7.png");
        assert_eq!("s_40_r_7.png".parse::<DotCloudName>().unwrap(), name);
        for bad in ["s_40_r_0.png", "s_40_r_7", "x_40_r_7.png", "s_4a_r_7.png", "s__r_1.png"] {
            assert!(bad.parse::<DotCloudName>().is_err(), "{bad}");
        }
    }

    #[test]
    fn white_names() {
        let name = WhiteName {
            lum_left: 0.33,
            lum_right: 0.5,
            context_left: 0,
            context_right: 1,
        };
        assert_eq!(name.to_string(), "white_0.33_0.5_0.0_1.0.png");
        assert_eq!(
            name.swapped().to_string(),
            "white_0.5_0.33_1.0_0.0.png"
        );
        assert_eq!(name.to_string().parse::<WhiteName>().unwrap(), name);
    }

    #[test]
    fn white_names_reject_foreign_spellings() {
        for bad in [
            "white_0.50_0.33_0.0_1.0.png",
            "white_0.5_0.33_0_1.png",
            "white_0.5_0.33_0.0_2.0.png",
            "white_0.5_0.33_0.0.png",
            "white_0.5_0.33_0.0_1.0.jpg",
        ] {
            assert!(bad.parse::<WhiteName>().is_err(), "{bad}");
        }
    }

    #[test]
    fn prefixes() {
        let name = DotCloudName::new(5, 1);
        let r = with_prefix("imgs/", &name);
        assert_eq!(r, "imgs/s_5_r_1.png");
        assert_eq!(strip_prefix("imgs/", &r), "s_5_r_1.png");
        assert_eq!(strip_prefix("imgs/", "s_5_r_1.png"), "s_5_r_1.png");
    }
}
