use crate::ConfigError;
use alloy::primitives::{Address, B256};
use url::Url;

/// A source of configuration variables, usually [`std::env::var`].
pub(crate) trait VarSource {
    fn var(&self, key: &str) -> Option<String>;
}

impl<F> VarSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Load a variable, treating empty values as unset.
pub(crate) fn load_string_opt(src: &impl VarSource, key: &str) -> Option<String> {
    src.var(key).filter(|s| !s.is_empty())
}

/// Load a variable
pub(crate) fn load_string(src: &impl VarSource, key: &str) -> Result<String, ConfigError> {
    load_string_opt(src, key).ok_or_else(|| ConfigError::missing(key))
}

/// Load a variable
pub(crate) fn load_u64_or(src: &impl VarSource, key: &str, default: u64) -> Result<u64, ConfigError> {
    load_string_opt(src, key)
        .map(|val| val.parse::<u64>().map_err(|err| ConfigError::parse(key, err)))
        .unwrap_or(Ok(default))
}

/// Load a variable
pub(crate) fn load_u16_or(src: &impl VarSource, key: &str, default: u16) -> Result<u16, ConfigError> {
    load_string_opt(src, key)
        .map(|val| val.parse::<u16>().map_err(|err| ConfigError::parse(key, err)))
        .unwrap_or(Ok(default))
}

/// Load a variable
pub(crate) fn load_url(src: &impl VarSource, key: &str) -> Result<Url, ConfigError> {
    load_string(src, key)?.parse().map_err(|err| ConfigError::parse(key, err))
}

/// Load a variable
pub(crate) fn load_url_opt(src: &impl VarSource, key: &str) -> Result<Option<Url>, ConfigError> {
    load_string_opt(src, key)
        .map(|val| val.parse().map_err(|err| ConfigError::parse(key, err)))
        .transpose()
}

/// Load a variable
pub(crate) fn load_address(src: &impl VarSource, key: &str) -> Result<Address, ConfigError> {
    load_string(src, key)?.parse().map_err(|err| ConfigError::parse(key, err))
}

/// Load a variable
pub(crate) fn load_b256_opt(src: &impl VarSource, key: &str) -> Result<Option<B256>, ConfigError> {
    load_string_opt(src, key)
        .map(|val| val.parse().map_err(|err| ConfigError::parse(key, err)))
        .transpose()
}
