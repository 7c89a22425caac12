//! Solver and request settings, read from TOML.
//!
//! Every key is optional, missing keys keep their defaults:
//! ```toml
//! tolerance = 1e-4
//! max_iterations = 1000
//! derivative_step = 1e-6
//! variable = "x"
//! case_insensitive = false
//! loglevel = "info"
//! log_to_file = false
//! ```
use crate::errors::SettingsError;
use crate::Utils::logger::level_from_str;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewtonPlotSettings {
    /// iteration stops when |f(x)| <= tolerance
    pub tolerance: f64,
    /// hard cap on Newton iterations per guess
    pub max_iterations: usize,
    /// step of the central difference
    pub derivative_step: f64,
    /// name of the free variable
    pub variable: String,
    /// lower-case the expression and the variable name before compiling
    pub case_insensitive: bool,
    pub loglevel: String,
    pub log_to_file: bool,
}

impl Default for NewtonPlotSettings {
    fn default() -> Self {
        NewtonPlotSettings {
            tolerance: 1e-4,
            max_iterations: 1000,
            derivative_step: 1e-6,
            variable: "x".to_string(),
            case_insensitive: false,
            loglevel: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl NewtonPlotSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: NewtonPlotSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tolerance >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "tolerance should be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SettingsError::Invalid(
                "max_iterations should be a positive number".to_string(),
            ));
        }
        if !(self.derivative_step > 0.0 && self.derivative_step.is_finite()) {
            return Err(SettingsError::Invalid(format!(
                "derivative_step should be a positive number, got {}",
                self.derivative_step
            )));
        }
        let mut chars = self.variable.chars();
        let is_identifier = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        let folded = if self.case_insensitive {
            self.variable.to_lowercase()
        } else {
            self.variable.clone()
        };
        if !is_identifier || matches!(folded.as_str(), "pi" | "e" | "E") {
            return Err(SettingsError::Invalid(format!(
                "variable should be a plain name, got '{}'",
                self.variable
            )));
        }
        if level_from_str(&self.loglevel).is_none() {
            return Err(SettingsError::Invalid(format!(
                "loglevel must be debug, info, warn, error or off, got '{}'",
                self.loglevel
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = NewtonPlotSettings::from_toml_str("").unwrap();
        assert_eq!(settings, NewtonPlotSettings::default());
    }

    #[test]
    fn test_partial_document_overrides() {
        let settings = NewtonPlotSettings::from_toml_str(
            "tolerance = 1e-8\nvariable = \"t\"\ncase_insensitive = true\n",
        )
        .unwrap();
        assert_eq!(settings.tolerance, 1e-8);
        assert_eq!(settings.variable, "t");
        assert!(settings.case_insensitive);
        assert_eq!(settings.max_iterations, 1000);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = NewtonPlotSettings::from_toml_str("tolerence = 1e-3").unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for text in [
            "tolerance = -1.0",
            "max_iterations = 0",
            "derivative_step = 0.0",
            "variable = \"2x\"",
            "variable = \"pi\"",
            "variable = \"PI\"\ncase_insensitive = true",
            "loglevel = \"loud\"",
        ] {
            let err = NewtonPlotSettings::from_toml_str(text).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid(_)), "{}", text);
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_iterations = 50").unwrap();
        writeln!(file, "loglevel = \"warn\"").unwrap();
        let settings = NewtonPlotSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.max_iterations, 50);
        assert_eq!(settings.loglevel, "warn");
    }

    #[test]
    fn test_missing_file() {
        let err = NewtonPlotSettings::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
