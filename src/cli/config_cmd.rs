//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::recording::{AudioFormat, Duration};

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
        ConfigAction::Path => handle_path(store, presenter),
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
    let value = normalize_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "duration" => config.duration = Some(value.clone()),
        "output_dir" => config.output_dir = Some(value.clone()),
        "format" => config.format = Some(value.clone()),
        _ => unreachable!(), // Already validated
    }

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

    let value = match key {
        "duration" => config.duration,
        "output_dir" => config.output_dir,
        "format" => config.format,
        _ => unreachable!(),
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value("duration", config.duration.as_deref().unwrap_or(NOT_SET));
    presenter.key_value("output_dir", config.output_dir.as_deref().unwrap_or(NOT_SET));
    presenter.key_value("format", config.format.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate a config value and return the form it is stored in.
///
/// Formats are stored lower-cased; unlike the `--format` flag, an
/// unsupported format is rejected here rather than replaced.
fn normalize_config_value(key: &str, value: &str) -> Result<String, ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "duration" => value
            .parse::<Duration>()
            .map(|d| d.to_string())
            .map_err(|e| invalid(e.to_string())),
        "format" => value
            .parse::<AudioFormat>()
            .map(|f| f.to_string())
            .map_err(|e| invalid(e.to_string())),
        "output_dir" if value.trim().is_empty() => {
            Err(invalid("Directory must not be empty".to_string()))
        }
        _ => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AppConfig;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn normalize_duration() {
        assert_eq!(normalize_config_value("duration", "90s").unwrap(), "1m30s");
        assert_eq!(normalize_config_value("duration", "5").unwrap(), "5s");
        assert!(normalize_config_value("duration", "invalid").is_err());
        assert!(normalize_config_value("duration", "0s").is_err());
    }

    #[test]
    fn normalize_format() {
        assert_eq!(normalize_config_value("format", "FLAC").unwrap(), "flac");
        assert!(normalize_config_value("format", "wavf").is_err());
    }

    #[test]
    fn normalize_output_dir() {
        assert_eq!(
            normalize_config_value("output_dir", "./clips").unwrap(),
            "./clips"
        );
        assert!(normalize_config_value("output_dir", "  ").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            check_key("api_key"),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn set_persists_normalized_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "format".to_string(),
                value: "MP3".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.format, Some("mp3".to_string()));
        assert_eq!(config.duration, None);
    }

    #[tokio::test]
    async fn set_rejects_invalid_value_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        let result = handle_config_command(
            ConfigAction::Set {
                key: "duration".to_string(),
                value: "forever".to_string(),
            },
            &store,
            &presenter,
        )
        .await;

        assert!(result.is_err());
        assert!(!store.exists());
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }
}
