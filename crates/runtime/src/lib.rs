mod config;
pub mod logging;

pub use config::{
    APP_NAME_ENV, DEFAULT_APP_NAME, DEFAULT_HOST, DEFAULT_PORT, ERROR_CODES_ENV, HOST_ENV,
    PORT_ENV, PROGRAM_NAME, REDACTED_VALUE, SENSITIVE_PARAM_NAMES, WORKERS_ENV,
    default_error_codes_path, fmeta_dir, is_sensitive_param,
};

pub use logging::{init, init_if_configured};
