pub mod codec;
mod request;
mod response;

pub use request::{ApiRequest, Route, context_for};
pub use response::{ApiResponse, HealthReport};

pub const PATH_PARAM: &str = "path";
pub const DEPTH_PARAM: &str = "depth";

/// Object name reported in validation details.
pub const REQUEST_OBJECT: &str = "request";

/// Levels below the root included by a listing when `depth` is not given.
pub const DEFAULT_LIST_DEPTH: usize = 1;

/// Header sent with every HTTP response.
pub const CORS_HEADER: (&str, &str) = ("Access-Control-Allow-Origin", "*");
pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");
