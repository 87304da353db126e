//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::FileConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<FileConfig, ConfigError> {
    let config: FileConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::ServerOptions;
    use crate::config::schema::HandlerKind;

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(
            r#"
            addr = "127.0.0.1:9000"

            [[routes]]
            name = "echo"
            handler = "echo"

            [[routes]]
            name = "mirror"
            "#,
        )
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].handler, HandlerKind::Echo);

        let server = ServerOptions::apply(config.into_options());
        assert_eq!(server.addr(), "127.0.0.1:9000");
        assert_eq!(server.routes().names().collect::<Vec<_>>(), ["echo", "mirror"]);
    }

    #[test]
    fn test_address_defaults() {
        let config = parse_config("[[routes]]\nname = \"echo\"\n").unwrap();
        assert_eq!(config.addr, ":8080");
    }

    #[test]
    fn test_unknown_handler_is_parse_error() {
        let err = parse_config("[[routes]]\nname = \"echo\"\nhandler = \"nope\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_all() {
        let err = parse_config("addr = \"\"\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: address is empty, no routes configured"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/annotated-echo.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
