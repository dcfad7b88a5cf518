//! `${VAR}` and `${VAR:-default}` expansion in configuration values.
//!
//! Values without a `${` reference are returned untouched.

use std::borrow::Cow;
use std::env;

use crate::ConfigError;

/// Variable that was referenced without a default and is not set.
struct UnsetVar(String);

/// Expand variable references in the value of `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| match env::var(name) {
        Ok(resolved) => Ok(Some(resolved)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    };

    shellexpand::env_with_context(value, lookup)
        .map(Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        })
}
