use std::env;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref VAR_RE: Regex =
        Regex::new(r"\$\{([A-Za-z0-9_]+)(?::-([^}]*))?\}|\$([A-Za-z0-9_]+)").unwrap();
}

pub struct VariablesUtils {}

impl VariablesUtils {
    /// Expands `${VAR}`, `${VAR:-default}` and `$VAR` from the current environment.
    /// Unset variables without a default expand to an empty string.
    pub fn expand_env_vars(input: &str) -> String {
        Self::expand_with(input, |key| env::var(key).ok())
    }

    pub fn expand_with<F>(input: &str, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        VAR_RE
            .replace_all(input, |caps: &Captures| {
                let (key, default) = match (caps.get(1), caps.get(3)) {
                    (Some(key), _) => (key.as_str(), caps.get(2).map(|d| d.as_str())),
                    (None, Some(key)) => (key.as_str(), None),
                    (None, None) => return String::new(),
                };

                lookup(key)
                    .filter(|value| !value.is_empty() || default.is_none())
                    .or_else(|| default.map(str::to_string))
                    .unwrap_or_default()
            })
            .to_string()
    }
}
