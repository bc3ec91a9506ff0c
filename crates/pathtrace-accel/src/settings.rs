//! BVH build settings.

use serde::{Deserialize, Serialize};

use crate::error::{AccelError, Result};

/// How split candidates are generated for the SAH cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Every member centroid on every axis is a candidate. O(k²) per node.
    #[default]
    Exhaustive,
    /// Centroids are bucketed into `bins` equal-width bins per axis and
    /// only bin boundaries are candidates.
    Binned {
        /// Number of buckets per axis. Must be at least 2.
        bins: usize,
    },
}

/// Parameters for [`Bvh::build_with`](crate::Bvh::build_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhSettings {
    /// Split candidate strategy.
    pub split: SplitStrategy,
}

impl BvhSettings {
    /// Settings using the binned strategy with `bins` buckets.
    pub fn binned(bins: usize) -> Self {
        Self {
            split: SplitStrategy::Binned { bins },
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if let SplitStrategy::Binned { bins } = self.split {
            if bins < 2 {
                return Err(AccelError::InvalidSettings(format!(
                    "binned split needs at least 2 bins, got {bins}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from a TOML document.
    ///
    /// Missing fields fall back to [`BvhSettings::default`].
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: BvhSettings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }
}
