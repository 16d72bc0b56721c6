//! Command runners for play, info, delete and notification actions

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::ports::{AssetStore, ConfigStore, Notifier};
use crate::application::{
    EventLoop, EventSink, LoopEvent, Notice, NotificationActionDispatcher, PlaybackController,
};
use crate::domain::config::AppConfig;
use crate::domain::playback::PlaybackEnd;
use crate::infrastructure::{
    create_notifier, CommandCallControl, FsAssetStore, ProcessRouting, RodioPlaybackDevice,
    XdgConfigStore,
};

use super::presenter::Presenter;
use super::signals::InterruptSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load and merge configuration: defaults < file < CLI/env
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring unreadable config: {}", e);
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Config overrides from global flags
pub fn cli_overrides(storage_dir: Option<PathBuf>, notify: bool) -> AppConfig {
    AppConfig {
        storage_dir: storage_dir.map(|p| p.to_string_lossy().into_owned()),
        notify: notify.then_some(true),
        call: None,
    }
}

/// Clip store rooted at the configured storage directory
pub fn asset_store(config: &AppConfig) -> Arc<FsAssetStore> {
    Arc::new(FsAssetStore::new(config.storage_dir_or_default()))
}

/// Playback controller wired to rodio and process-local routing
pub fn playback_controller(store: Arc<FsAssetStore>, events: EventSink) -> PlaybackController {
    PlaybackController::new(
        Box::new(RodioPlaybackDevice::new()),
        Arc::new(ProcessRouting::default()),
        store,
        events,
    )
}

/// Send a notice to the desktop when enabled; failures are only logged
pub async fn send_notice(notifier: &dyn Notifier, notice: &Notice) {
    if let Err(e) = notifier.show(notice).await {
        debug!("{}", e);
    }
}

/// `info`: describe the stored clip
pub fn run_info(config: &AppConfig, json: bool) -> ExitCode {
    let presenter = Presenter::new();
    let info = asset_store(config).describe();

    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(text) => presenter.output(&text),
            Err(e) => {
                presenter.error(&format!("Failed to serialize clip info: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        presenter.output(&info.to_string());
        if info.exists() {
            presenter.info(&format!("Size: {}", info.human_readable_size()));
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// `delete`: remove the stored clip
pub async fn run_delete(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let notifier = create_notifier(config.notify_or_default());

    if asset_store(config).delete() {
        let notice = Notice::FileDeleted;
        presenter.success(&notice.message());
        send_notice(notifier.as_ref(), &notice).await;
    } else {
        presenter.info("No recording to delete");
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// `play`: play the stored clip to the end
pub async fn run_play(config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();
    let notifier = create_notifier(config.notify_or_default());
    let mut interrupts = match InterruptSignal::new() {
        Ok(signal) => signal,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let store = asset_store(config);
    let mut event_loop = EventLoop::new();
    let mut player = playback_controller(Arc::clone(&store), event_loop.sink());

    let (done_tx, mut done_rx) = oneshot::channel();
    if player
        .play(move |end| {
            let _ = done_tx.send(end);
        })
        .is_some()
    {
        presenter.start_spinner("Playing hold notification...");
    }

    let end = loop {
        tokio::select! {
            end = &mut done_rx => break end.ok(),
            Some(event) = event_loop.next() => {
                if let LoopEvent::Playback(event) = event {
                    player.handle_event(event);
                }
            }
            _ = interrupts.recv() => {
                player.stop();
                break None;
            }
        }
    };
    presenter.stop_spinner();

    match end {
        Some(PlaybackEnd::Finished) => {
            let notice = Notice::PlaybackCompleted;
            presenter.success(&notice.message());
            send_notice(notifier.as_ref(), &notice).await;
            ExitCode::from(EXIT_SUCCESS)
        }
        Some(PlaybackEnd::MissingAsset) => {
            presenter.warn(&format!("No recording to play ({})", store.resolve_path().display()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Some(PlaybackEnd::EmptyAsset) => {
            presenter.warn("Recording is empty");
            ExitCode::from(EXIT_SUCCESS)
        }
        Some(PlaybackEnd::Failed(reason)) => {
            presenter.error(&format!("Playback failed: {}", reason));
            ExitCode::from(EXIT_ERROR)
        }
        None => {
            presenter.info("Playback stopped");
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

/// `action <id>`: handle a call-notification action as the dialer would
pub async fn run_action(config: &AppConfig, identifier: &str) -> ExitCode {
    let presenter = Presenter::new();

    let mut event_loop = EventLoop::new();
    let mut player = playback_controller(asset_store(config), event_loop.sink());
    let dispatcher =
        NotificationActionDispatcher::new(Arc::new(CommandCallControl::from_config(config)));

    let action = match dispatcher.dispatch_identifier(identifier, &mut player) {
        Ok(action) => action,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    presenter.success(&format!("Handled {}", action));

    if player.is_idle() {
        return ExitCode::from(EXIT_SUCCESS);
    }

    // Accept-and-play: keep the loop alive until the clip ends
    let mut interrupts = match InterruptSignal::new() {
        Ok(signal) => signal,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            player.stop();
            return ExitCode::from(EXIT_ERROR);
        }
    };
    while !player.is_idle() {
        tokio::select! {
            Some(event) = event_loop.next() => {
                if let LoopEvent::Playback(event) = event {
                    player.handle_event(event);
                }
            }
            _ = interrupts.recv() => player.stop(),
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// `config ...` entry point returning an exit code
pub async fn run_config(action: super::args::ConfigAction) -> ExitCode {
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();
    match super::config_cmd::handle_config_command(action, &store, &presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
