//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, CallConfig};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(lookup(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, lookup(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Write one validated value into the config
fn apply(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "storage_dir" => {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must not be empty".to_string(),
                });
            }
            config.storage_dir = Some(value.to_string());
        }
        "notify" => {
            config.notify = Some(parse_bool(value).ok_or_else(|| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?);
        }
        "call.accept_command" => {
            call_table(config).accept_command = Some(value.to_string());
        }
        "call.reject_command" => {
            call_table(config).reject_command = Some(value.to_string());
        }
        _ => return check_key(key),
    }
    Ok(())
}

fn call_table(config: &mut AppConfig) -> &mut CallConfig {
    config.call.get_or_insert_with(CallConfig::default)
}

fn lookup(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "storage_dir" => config.storage_dir.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "call.accept_command" => config.accept_command().map(str::to_owned),
        "call.reject_command" => config.reject_command().map(str::to_owned),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
