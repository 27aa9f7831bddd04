use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::Error;

/// Which CodeIgniter release line produced a source project.
///
/// The three generations are told apart by directory fingerprints, see
/// [`crate::detection::detect_generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    Ci2,
    Ci3,
    Ci4,
    #[default]
    Unknown,
}

impl Generation {
    /// Every generation the engine can migrate, in registration order.
    pub const SUPPORTED: [Generation; 3] = [Generation::Ci2, Generation::Ci3, Generation::Ci4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Generation::Ci2 => "ci2",
            Generation::Ci3 => "ci3",
            Generation::Ci4 => "ci4",
            Generation::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Generation::Ci2 => "CodeIgniter 2",
            Generation::Ci3 => "CodeIgniter 3",
            Generation::Ci4 => "CodeIgniter 4",
            Generation::Unknown => "Unknown CodeIgniter version",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Generation::Ci2 => "CI2",
            Generation::Ci3 => "CI3",
            Generation::Ci4 => "CI4",
            Generation::Unknown => "UNKNOWN",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Generation::Unknown)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Generation {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "ci2" | "codeigniter2" => Ok(Generation::Ci2),
            "ci3" | "codeigniter3" => Ok(Generation::Ci3),
            "ci4" | "codeigniter4" => Ok(Generation::Ci4),
            "unknown" => Ok(Generation::Unknown),
            _ => Err(Error::Validation(format!(
                "Unsupported CodeIgniter version: {input}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_long_and_short_forms() {
        assert_eq!("ci3".parse::<Generation>().unwrap(), Generation::Ci3);
        assert_eq!("CodeIgniter4".parse::<Generation>().unwrap(), Generation::Ci4);
        assert_eq!("unknown".parse::<Generation>().unwrap(), Generation::Unknown);
        assert!("ci5".parse::<Generation>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Generation::Ci2.label(), "CodeIgniter 2");
        assert_eq!(Generation::Ci4.short_label(), "CI4");
        assert_eq!(Generation::Ci3.to_string(), "ci3");
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Generation::Ci3).unwrap();
        assert_eq!(json, "\"ci3\"");
    }
}
