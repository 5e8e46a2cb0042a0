use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalysisSettings, RecalcSettings, RiskThresholds, Settings, ValidationLimits,
    WarningThresholds,
};

/// The settings file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "carry.toml";

/// Loads the calculator settings.
///
/// Reads `path` when given (it must exist), otherwise an optional `carry.toml`
/// in the working directory. Environment variables prefixed with `CARRY_`
/// override file values, using `__` between section and key
/// (e.g. `CARRY_VALIDATION__MAX_FEE_RATE=5`). Every value has a default, so an
/// empty configuration is valid.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("CARRY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Loaded calculator settings.");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn file_values_override_defaults_section_by_section() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[validation]\nmax_price_divergence_pct = 40\n\n[recalc]\ndebounce_ms = 50"
        )
        .unwrap();

        let settings = load_config(Some(file.path())).unwrap();
        assert_eq!(settings.validation.max_price_divergence_pct, dec!(40));
        assert_eq!(settings.validation.max_total_cost_rate, dec!(30));
        assert_eq!(settings.recalc.debounce_ms, 50);
        assert_eq!(settings.risk, RiskThresholds::default());
    }

    #[test]
    fn invalid_file_values_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[warnings]\nmoderate_leverage = 20\nhigh_leverage = 10").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_explicit_file_is_a_load_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
