//! Inclusive depth window used by the slicer and flattener.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default upper bound used by the goal views.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Inverted window passed to [`DepthWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthWindowError {
    Inverted { min: usize, max: usize },
}

impl Display for DepthWindowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inverted { min, max } => {
                write!(f, "depth window min ({min}) must be <= max ({max})")
            }
        }
    }
}

impl Error for DepthWindowError {}

/// Inclusive `[min, max]` range of absolute depths.
///
/// # Invariants
/// - `min <= max`, enforced by every constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DepthWindow {
    min: usize,
    max: usize,
}

impl DepthWindow {
    /// Creates a window, rejecting `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self, DepthWindowError> {
        if min > max {
            return Err(DepthWindowError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a window, raising `max` to `min` when the range is inverted.
    pub fn clamped(min: usize, max: usize) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Creates a window from untrusted signed input; negative values clamp to 0.
    pub fn normalized(min: i64, max: i64) -> Self {
        let min = usize::try_from(min.max(0)).unwrap_or(usize::MAX);
        let max = usize::try_from(max.max(0)).unwrap_or(usize::MAX);
        Self::clamped(min, max)
    }

    /// Window that admits every depth.
    pub fn unbounded() -> Self {
        Self {
            min: 0,
            max: usize::MAX,
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, depth: usize) -> bool {
        (self.min..=self.max).contains(&depth)
    }
}

impl Default for DepthWindow {
    fn default() -> Self {
        Self {
            min: 0,
            max: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'de> Deserialize<'de> for DepthWindow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            min: usize,
            max: usize,
        }

        let wire = Wire::deserialize(deserializer)?;
        DepthWindow::new(wire.min, wire.max).map_err(serde::de::Error::custom)
    }
}
