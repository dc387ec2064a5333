//! Numeric `major.minor.patch` version ordering

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error type for unparsable version strings
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,

    #[error("version component '{component}' in '{version}' is not a number")]
    InvalidComponent { version: String, component: String },
}

/// A hub or release version, compared numerically
///
/// Parsing accepts `4`, `4.1`, `4.3.19`, `v0.6.1` and ignores anything after
/// the leading digits of a component (`4.4.0-beta` is `4.4.0`). Missing
/// components are zero, extra components are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HubVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl HubVersion {
    /// Create a version from its components
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    fn parse_component(version: &str, component: &str) -> Result<u32, VersionError> {
        let digits: String = component
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits
            .parse()
            .map_err(|_| VersionError::InvalidComponent {
                version: version.to_string(),
                component: component.to_string(),
            })
    }
}

impl FromStr for HubVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut parts = [0u32; 3];
        for (slot, component) in parts.iter_mut().zip(trimmed.split('.')) {
            *slot = Self::parse_component(s, component)?;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for HubVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
