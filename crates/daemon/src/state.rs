use anyhow::Context;
use fmeta_envelope::ErrorCatalog;
use fmeta_runtime::default_error_codes_path;
use fmeta_service::MetadataService;
use log::info;

use crate::config::DaemonConfig;

pub struct DaemonState {
    pub config: DaemonConfig,
    pub service: MetadataService,
}

impl DaemonState {
    pub fn new(config: DaemonConfig) -> anyhow::Result<Self> {
        let catalog = match &config.error_codes {
            Some(path) => {
                info!("Loading error codes from {}", path.display());
                ErrorCatalog::load(path)
            }
            None => ErrorCatalog::load_or_builtin(&default_error_codes_path()),
        }
        .context("Failed to load error codes")?;

        let service = MetadataService::new(config.app_name.clone(), catalog);
        Ok(Self { config, service })
    }
}
