//! Cross-field checks on loaded settings.

use crate::config::Settings;
use crate::error::ConfigError;

/// Schema names are interpolated into DDL, so only plain identifiers are accepted.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if !is_plain_identifier(&settings.schema) {
        return Err(ConfigError::Invalid {
            key: "PRODUCTS_SCHEMA",
            reason: format!("'{}' is not a plain identifier", settings.schema),
        });
    }
    if settings.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "DATABASE_MAX_CONNECTIONS",
            reason: "must be at least 1".into(),
        });
    }
    if settings.body_limit_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "BODY_LIMIT_BYTES",
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}
