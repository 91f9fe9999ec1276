//! Main app runner for one-shot recording

use std::process::ExitCode;
use std::sync::Arc;

use crate::application::ports::{ConfigStore, ProgressCallback};
use crate::domain::config::AppConfig;
use crate::infrastructure::{MicRecorder, XdgConfigStore};

use super::args::RecordOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Record one clip and print where it was saved
pub async fn run_oneshot(options: RecordOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Construction creates the directory and validates the format;
    // both only warn on failure
    let recorder = MicRecorder::new(options.duration, options.output_dir, &options.format);

    presenter.start_spinner(&format!("Recording {}...", recorder.duration()));
    let on_progress: ProgressCallback = match presenter.spinner_handle() {
        Some(spinner) => Arc::new(move |elapsed, total| {
            spinner.set_message(format!(
                "Recording... {}",
                Presenter::format_progress(elapsed, total)
            ));
        }),
        None => Arc::new(|_, _| {}),
    };

    // Capture blocks the calling thread for the whole duration
    let result =
        tokio::task::spawn_blocking(move || recorder.start_recording_with_progress(on_progress))
            .await;

    match result {
        Ok(Ok(capture)) => {
            presenter.spinner_success("Recording complete");
            presenter.output(&capture.file_path().display().to_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(Err(e)) => {
            presenter.spinner_fail("Recording failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.spinner_fail("Recording failed");
            presenter.error(&format!("Recording task failed: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Load merged configuration from the default XDG location
pub async fn load_default_config(cli_config: AppConfig) -> AppConfig {
    load_merged_config(&XdgConfigStore::new(), cli_config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cli_overrides_file_which_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        store
            .save(&AppConfig {
                duration: Some("20s".to_string()),
                format: Some("flac".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let cli = AppConfig {
            format: Some("mp3".to_string()),
            ..Default::default()
        };
        let merged = load_merged_config(&store, cli).await;

        assert_eq!(merged.duration, Some("20s".to_string()));
        assert_eq!(merged.format, Some("mp3".to_string()));
        assert_eq!(merged.output_dir, Some("./recordings/".to_string()));
    }

    #[tokio::test]
    async fn broken_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "duration = [").await.unwrap();

        let store = XdgConfigStore::with_path(path);
        let merged = load_merged_config(&store, AppConfig::empty()).await;

        assert_eq!(merged, AppConfig::defaults());
    }
}
