use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "fmeta";
pub const PROGRAM_LOG_LEVEL: &str = "FMETA_LOG_LEVEL";
pub const PROGRAM_LOG_FILE: &str = "FMETA_LOG_FILE";

/// Name reported as `applicationName` in error envelopes.
pub const DEFAULT_APP_NAME: &str = "file-metadata";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

pub const HOST_ENV: &str = "FMETA_HOST";
pub const PORT_ENV: &str = "FMETA_PORT";
pub const APP_NAME_ENV: &str = "FMETA_APP_NAME";
pub const ERROR_CODES_ENV: &str = "FMETA_ERROR_CODES";
pub const WORKERS_ENV: &str = "FMETA_WORKERS";

pub const ERROR_CODES_FILE_NAME: &str = "error-codes.json";

/// Request parameters whose values are never echoed back in error envelopes.
/// Matching is case-insensitive on the parameter name.
pub const SENSITIVE_PARAM_NAMES: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "access_token",
    "api_key",
    "apikey",
    "authorization",
];

pub const REDACTED_VALUE: &str = "******";

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var) {
        PathBuf::from(dir)
    } else {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

pub fn fmeta_dir() -> PathBuf {
    xdg_or_home("XDG_CONFIG_HOME", ".config").join(PROGRAM_NAME)
}

/// Default location of the error-code message overrides.
pub fn default_error_codes_path() -> PathBuf {
    fmeta_dir().join(ERROR_CODES_FILE_NAME)
}

#[inline]
pub fn is_sensitive_param(name: &str) -> bool {
    SENSITIVE_PARAM_NAMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(name))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
