//! Solver settings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SvdError};

/// Parameters for [`Svd3Solver::decompose`](crate::Svd3Solver::decompose)
/// and [`weighted_average`](crate::weighted_average).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvdSettings {
    /// QR sweeps allowed per singular value before giving up.
    pub max_iterations: u32,
}

impl Default for SvdSettings {
    fn default() -> Self {
        Self { max_iterations: 30 }
    }
}

impl SvdSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SvdError::InvalidSettings(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = SvdSettings::default();
        assert_eq!(settings.max_iterations, 30);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let settings = SvdSettings { max_iterations: 0 };
        assert!(matches!(
            settings.validate(),
            Err(SvdError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = SvdSettings { max_iterations: 75 };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"max_iterations":75}"#);
        let back: SvdSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: SvdSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SvdSettings::default());
    }
}
