use thiserror::Error;

use crate::config::app_config::ConfigError;
use crate::export::ExportError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("failed to render dashboard")]
    Render(#[from] serde_yaml::Error),
}
