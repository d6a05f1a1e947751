//! Environment variable and home directory expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}`, `${VAR:-default}` and a leading `~` in a string.
///
/// Returns the original string unchanged if neither `${` nor a leading `~`
/// is present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(shellexpand::tilde(value).into_owned());
    }

    let lookup = |var: &str| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    };
    let expanded = shellexpand::env_with_context(value, lookup).map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })?;

    Ok(shellexpand::tilde(&expanded).into_owned())
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}
