//! Validation settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Separator used when plain messages are folded into a structured error.
pub const DEFAULT_MESSAGE_SEPARATOR: &str = "; ";

/// Configuration values controlling how validation failures are rendered.
///
/// Values come from CLI arguments, `VALIDATION_*` environment variables and
/// configuration files, in OrthoConfig's usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VALIDATION")]
pub struct ValidationSettings {
    /// Separator placed between messages in an aggregated error.
    pub message_separator: Option<String>,
}

impl ValidationSettings {
    /// Return the configured separator, falling back to the default.
    pub fn message_separator(&self) -> &str {
        self.message_separator
            .as_deref()
            .unwrap_or(DEFAULT_MESSAGE_SEPARATOR)
    }
}
