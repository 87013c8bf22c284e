use std::path::Path;
use crate::config::proc_validator;
use crate::config::sources::ServiceConfig;
use crate::error::PollerError;
use regex::Regex;
use tracing::{debug, error};

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig, PollerError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|err| {
        PollerError::Config(format!("cannot read config file '{}': {}", path.display(), err))
    })?;

    let expanded = expand_env_vars(&content)?;
    parse_config(expanded)
}

pub fn parse_config(content: String) -> Result<ServiceConfig, PollerError> {
    let service_config: ServiceConfig = serde_yaml::from_str(&content)
        .map_err(|e| {
            error!("parse config error: {}", e);
            PollerError::Config(format!("invalid config format: {}", e))
        })?;

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config).map_err(|errors| {
        PollerError::Config(format!(
            "config is not valid, total errors: {}\n{}",
            errors.len(),
            errors.join("\n")
        ))
    })?;

    Ok(service_config)
}

/// Replace `${VAR}` and `${VAR:default}` with values from the environment.
pub fn expand_env_vars(input: &str) -> Result<String, PollerError> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")
        .map_err(|e| PollerError::Config(format!("env placeholder pattern: {}", e)))?;
    Ok(re
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string())
}
