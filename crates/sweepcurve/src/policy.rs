//! Stamp-count policies.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest copy count a fixed-count policy accepts.
pub const MAX_FIXED_COUNT: u32 = 1_000_000;

/// How many stamps a sweep places and where.
///
/// Chosen once when the tool is built and never changed afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StampPolicy {
    /// One stamp at the start of the curve.
    Single,
    /// `N ≥ 2` stamps evenly spaced in parameter space, both ends included.
    FixedCount(u32),
    /// Stamps roughly one structure width apart, measured along the curve.
    #[default]
    AutoSpacing,
}

impl StampPolicy {
    /// Map a brush "copies" argument onto a policy.
    ///
    /// Zero or negative counts select [`StampPolicy::AutoSpacing`], one selects
    /// [`StampPolicy::Single`], anything larger a fixed count.
    pub fn from_copies(copies: i64) -> Self {
        match copies {
            c if c <= 0 => Self::AutoSpacing,
            1 => Self::Single,
            c => Self::FixedCount(u32::try_from(c).unwrap_or(u32::MAX)),
        }
    }

    /// Check that the policy can be planned.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::FixedCount(n) if n < 2 => Err(Error::InvalidPolicy(format!(
                "a fixed count needs at least 2 copies, got {n}"
            ))),
            Self::FixedCount(n) if n > MAX_FIXED_COUNT => Err(Error::InvalidPolicy(format!(
                "a fixed count allows at most {MAX_FIXED_COUNT} copies, got {n}"
            ))),
            policy => Ok(policy),
        }
    }
}

impl fmt::Display for StampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::FixedCount(n) => write!(f, "{n}"),
            Self::AutoSpacing => f.write_str("auto"),
        }
    }
}

impl FromStr for StampPolicy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(Self::Single),
            "auto" => Ok(Self::AutoSpacing),
            other => {
                let n = other.parse::<u32>().map_err(|_| {
                    Error::InvalidPolicy(format!(
                        "'{value}' is not a policy; use 'single', 'auto' or a copy count"
                    ))
                })?;
                Self::FixedCount(n).validate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_mapping() {
        assert_eq!(StampPolicy::from_copies(-1), StampPolicy::AutoSpacing);
        assert_eq!(StampPolicy::from_copies(0), StampPolicy::AutoSpacing);
        assert_eq!(StampPolicy::from_copies(1), StampPolicy::Single);
        assert_eq!(StampPolicy::from_copies(7), StampPolicy::FixedCount(7));
    }

    #[test]
    fn parse_and_display() -> Result<()> {
        for policy in [
            StampPolicy::Single,
            StampPolicy::AutoSpacing,
            StampPolicy::FixedCount(12),
        ] {
            assert_eq!(policy.to_string().parse::<StampPolicy>()?, policy);
        }
        assert_eq!(" Auto ".parse::<StampPolicy>()?, StampPolicy::AutoSpacing);
        assert_eq!("1".parse::<StampPolicy>()?, StampPolicy::Single);
        Ok(())
    }

    #[test]
    fn rejects_bad_policies() {
        assert!(matches!(
            "0".parse::<StampPolicy>(),
            Err(Error::InvalidPolicy(_))
        ));
        assert!(matches!(
            "many".parse::<StampPolicy>(),
            Err(Error::InvalidPolicy(_))
        ));
        assert!(StampPolicy::FixedCount(1).validate().is_err());
        assert!(StampPolicy::FixedCount(2).validate().is_ok());
    }

    #[test]
    fn rejects_oversized_counts() {
        assert!(matches!(
            "4000000000".parse::<StampPolicy>(),
            Err(Error::InvalidPolicy(_))
        ));
        assert!(StampPolicy::from_copies(i64::MAX).validate().is_err());
        assert!(StampPolicy::FixedCount(MAX_FIXED_COUNT).validate().is_ok());
        assert!(StampPolicy::FixedCount(MAX_FIXED_COUNT + 1).validate().is_err());
    }
}
