//! The clipboard structure a sweep stamps.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Bounding size of a structure in blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    /// Size along X.
    pub width: u32,
    /// Size along Y. Not used for spacing.
    pub height: u32,
    /// Size along Z.
    pub depth: u32,
}

impl Extent {
    /// Create an extent from its three sizes.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Width of the horizontal footprint: the larger of the X and Z sizes.
    ///
    /// This is the distance auto spacing aims to keep between stamps.
    pub fn footprint(&self) -> u32 {
        self.width.max(self.depth)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

impl FromStr for Extent {
    type Err = String;

    /// Parse `WxHxD`, e.g. `5x3x2`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let sizes = value
            .split(['x', 'X'])
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| format!("invalid extent '{value}': sizes must be non-negative integers"))?;
        match sizes.as_slice() {
            [w, h, d] => Ok(Self::new(*w, *h, *d)),
            _ => Err(format!("invalid extent '{value}': expected WIDTHxHEIGHTxDEPTH")),
        }
    }
}

/// A captured block region held by the session's clipboard.
///
/// Only its name and extent matter to a sweep; the block data itself stays
/// with the world implementation that performs the paste.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    /// Label used in messages and reports.
    pub name: String,
    /// Bounding size in blocks.
    pub extent: Extent,
}

impl Structure {
    /// Create a structure named `name` with the given extent.
    pub fn new(name: impl Into<String>, extent: Extent) -> Self {
        Self {
            name: name.into(),
            extent,
        }
    }
}
