//! Error types of the crate.
//!
//! Compilation and input errors are detected before any Newton iteration
//! starts and are kept as separate variants, so a caller can show a different
//! message for each of them. Non-convergence is never an error.

use thiserror::Error;

/// Errors raised while turning a string into a [`NumericFunction`](crate::symbolic::symbolic_lambdify::NumericFunction).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The text is not a syntactically valid expression
    #[error("syntax error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// A name that is neither the variable, a known constant nor a known function
    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),
}

/// Errors of a whole root-plot request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NewtonPlotError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// An initial guess that cannot be read as a finite real number
    #[error("invalid initial guess '{0}'")]
    InvalidGuess(String),

    /// The expression does not mention the free variable, nothing was computed
    #[error("expression '{expression}' does not contain the variable '{variable}'")]
    NotProcessable { expression: String, variable: String },
}

/// Errors while loading [`NewtonPlotSettings`](crate::Utils::settings::NewtonPlotSettings).
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = CompileError::Parse {
            position: 3,
            message: "unexpected ')'".to_string(),
        };
        assert_eq!(format!("{}", err), "syntax error at position 3: unexpected ')'");
    }

    #[test]
    fn test_compile_error_is_transparent_inside_request_error() {
        let err: NewtonPlotError = CompileError::UndefinedSymbol("y".to_string()).into();
        assert_eq!(format!("{}", err), "undefined symbol 'y'");
        assert!(matches!(
            err,
            NewtonPlotError::Compile(CompileError::UndefinedSymbol(_))
        ));
    }

    #[test]
    fn test_invalid_guess_display() {
        let err = NewtonPlotError::InvalidGuess("abc".to_string());
        assert_eq!(format!("{}", err), "invalid initial guess 'abc'");
    }
}
