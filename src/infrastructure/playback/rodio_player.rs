//! Clip playback using rodio
//!
//! `rodio::OutputStream` is not `Send`, so each session runs a worker thread
//! that owns the stream and sink. Preparation (opening the output and
//! decoding the header) happens on that thread and is reported back through
//! the event loop, like every later state change.

use std::fs::File;
use std::io::BufReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::application::events::{EventSink, PlaybackEvent};
use crate::application::ports::{
    DeviceError, PlaybackDevice, PlaybackHandle, PlaybackRequest,
};

/// How often the worker checks whether the sink drained
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Opens playback sessions on the default output device
#[derive(Debug, Clone, Copy, Default)]
pub struct RodioPlaybackDevice;

impl RodioPlaybackDevice {
    pub fn new() -> Self {
        Self
    }
}

impl PlaybackDevice for RodioPlaybackDevice {
    fn open(
        &self,
        request: PlaybackRequest,
        events: EventSink,
    ) -> Result<Box<dyn PlaybackHandle>, DeviceError> {
        if !request.path.is_file() {
            return Err(DeviceError::Open(format!(
                "{} is not a file",
                request.path.display()
            )));
        }
        debug!(
            "Opened playback session {} ({:?}/{:?})",
            request.token, request.attributes.usage, request.attributes.content
        );
        Ok(Box::new(RodioPlaybackHandle {
            request,
            events,
            playing: Arc::new(AtomicBool::new(false)),
            worker: None,
        }))
    }
}

enum PlayerCommand {
    SetVolume(f32),
    Start,
    Stop,
}

struct Worker {
    commands: Sender<PlayerCommand>,
    thread: JoinHandle<()>,
}

pub struct RodioPlaybackHandle {
    request: PlaybackRequest,
    events: EventSink,
    playing: Arc<AtomicBool>,
    worker: Option<Worker>,
}

impl RodioPlaybackHandle {
    fn send(&self, command: PlayerCommand) -> Result<(), DeviceError> {
        self.worker
            .as_ref()
            .ok_or_else(|| DeviceError::Start("Device not prepared".into()))?
            .commands
            .send(command)
            .map_err(|_| DeviceError::Start("Playback worker exited".into()))
    }

    fn shutdown_worker(&mut self) {
        self.playing.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.commands.send(PlayerCommand::Stop);
            if worker.thread.join().is_err() {
                warn!("Playback worker panicked");
            }
        }
    }
}

impl PlaybackHandle for RodioPlaybackHandle {
    fn prepare_async(&mut self) -> Result<(), DeviceError> {
        if self.worker.is_some() {
            return Err(DeviceError::Prepare("Already prepared".into()));
        }

        let (commands, command_rx) = mpsc::channel();
        let session = PlayerSession {
            request: self.request.clone(),
            events: self.events.clone(),
            playing: Arc::clone(&self.playing),
        };
        let thread = std::thread::Builder::new()
            .name("hold-notice-playback".into())
            .spawn(move || session.run(command_rx))
            .map_err(|e| DeviceError::Prepare(e.to_string()))?;

        self.worker = Some(Worker { commands, thread });
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), DeviceError> {
        self.send(PlayerCommand::SetVolume(volume.clamp(0.0, 1.0)))
    }

    fn start(&mut self) -> Result<(), DeviceError> {
        self.send(PlayerCommand::Start)?;
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        self.shutdown_worker();
        Ok(())
    }

    fn release(&mut self) {
        self.shutdown_worker();
    }
}

impl Drop for RodioPlaybackHandle {
    fn drop(&mut self) {
        self.shutdown_worker();
    }
}

/// Worker-thread side of one playback session
struct PlayerSession {
    request: PlaybackRequest,
    events: EventSink,
    playing: Arc<AtomicBool>,
}

impl PlayerSession {
    fn run(self, commands: Receiver<PlayerCommand>) {
        let token = self.request.token;
        let (_stream, sink) = match self.open_sink() {
            Ok(opened) => opened,
            Err(reason) => {
                self.events.post(PlaybackEvent::Failed { token, reason });
                return;
            }
        };
        self.events.post(PlaybackEvent::Prepared { token });

        let mut started = false;
        loop {
            match commands.recv_timeout(POLL_INTERVAL) {
                Ok(PlayerCommand::SetVolume(volume)) => sink.set_volume(volume),
                Ok(PlayerCommand::Start) => {
                    sink.play();
                    started = true;
                }
                Ok(PlayerCommand::Stop) | Err(RecvTimeoutError::Disconnected) => {
                    sink.stop();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    if started && sink.empty() {
                        started = false;
                        self.playing.store(false, Ordering::SeqCst);
                        self.events.post(PlaybackEvent::Completed { token });
                    }
                }
            }
        }
        debug!("Playback worker for session {} exited", token);
    }

    /// Open the output, decode the clip header and queue it paused
    fn open_sink(&self) -> Result<(OutputStream, Sink), String> {
        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| e.to_string())?;
        let sink = Sink::try_new(&stream_handle).map_err(|e| e.to_string())?;

        let file = File::open(&self.request.path).map_err(|e| e.to_string())?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| e.to_string())?;

        sink.pause();
        sink.append(source);
        Ok((stream, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::{EventLoop, LoopEvent, SessionToken};
    use crate::application::ports::PlaybackAttributes;

    fn request(path: std::path::PathBuf) -> PlaybackRequest {
        PlaybackRequest {
            token: SessionToken::new(9),
            path,
            attributes: PlaybackAttributes::SPEECH_MEDIA,
        }
    }

    #[test]
    fn open_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let event_loop = EventLoop::new();

        let result = RodioPlaybackDevice::new()
            .open(request(dir.path().join("missing.flac")), event_loop.sink());

        assert!(matches!(result, Err(DeviceError::Open(_))));
    }

    #[test]
    fn start_before_prepare_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.flac");
        std::fs::write(&path, b"not audio").unwrap();
        let event_loop = EventLoop::new();
        let mut handle = RodioPlaybackDevice::new()
            .open(request(path), event_loop.sink())
            .unwrap();

        assert!(handle.start().is_err());
        assert!(!handle.is_playing());
        handle.release();
        handle.release();
    }

    #[tokio::test]
    async fn undecodable_clip_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.flac");
        std::fs::write(&path, b"definitely not flac").unwrap();
        let mut event_loop = EventLoop::new();
        let mut handle = RodioPlaybackDevice::new()
            .open(request(path), event_loop.sink())
            .unwrap();

        handle.prepare_async().unwrap();
        let event = event_loop.next().await.unwrap();
        handle.release();

        // Without an output device the open fails first; either way it is a failure
        assert!(matches!(
            event,
            LoopEvent::Playback(PlaybackEvent::Failed { token, .. }) if token == SessionToken::new(9)
        ));
    }
}
