mod mapping;
mod service;

pub use mapping::path_failure;
pub use service::MetadataService;
