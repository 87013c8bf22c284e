use std::path::Path;

use crate::ServiceConfig;
use crate::config::proc_loader::file_to_config;
use crate::error::PollerError;

pub async fn run(config_path: &str) -> Result<ServiceConfig, PollerError> {
    let path = Path::new(config_path);
    file_to_config(path).await
}
