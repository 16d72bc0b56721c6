//! In-memory fakes for the device ports, shared by unit tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::events::{EventSink, LoopEvent, PlaybackEvent, SessionToken};
use super::ports::{
    AudioRouting, CallControl, CaptureDevice, CaptureHandle, CaptureRequest, DeviceError,
    PermissionGate, PlaybackDevice, PlaybackHandle, PlaybackRequest, RoutingError,
};
use crate::domain::playback::RoutingMode;

/// Ordered log shared between fakes, for asserting cross-component ordering
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub struct CaptureScript {
    pub fail_open: bool,
    pub fail_prepare: bool,
    pub fail_start: bool,
    pub fail_stop: bool,
    /// Write an empty file on stop instead of audio bytes
    pub write_empty: bool,
}

#[derive(Clone)]
pub struct FakeCaptureDevice {
    script: CaptureScript,
    calls: CallLog,
    open_handles: Arc<AtomicUsize>,
    open_count: Arc<AtomicUsize>,
    last_token: Arc<Mutex<Option<SessionToken>>>,
}

impl FakeCaptureDevice {
    pub fn new(script: CaptureScript) -> Self {
        Self {
            script,
            calls: CallLog::default(),
            open_handles: Arc::new(AtomicUsize::new(0)),
            open_count: Arc::new(AtomicUsize::new(0)),
            last_token: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.entries()
    }

    /// Handles opened and not yet released
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    /// Total number of successful opens
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<SessionToken> {
        *self.last_token.lock().unwrap()
    }
}

impl CaptureDevice for FakeCaptureDevice {
    fn open(
        &self,
        request: CaptureRequest,
        _events: EventSink,
    ) -> Result<Box<dyn CaptureHandle>, DeviceError> {
        self.calls.push("open");
        if self.script.fail_open {
            return Err(DeviceError::Open("scripted open failure".into()));
        }
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        self.open_count.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = Some(request.token);
        Ok(Box::new(FakeCaptureHandle {
            request,
            script: self.script.clone(),
            calls: self.calls.clone(),
            open_handles: Arc::clone(&self.open_handles),
            released: false,
        }))
    }
}

struct FakeCaptureHandle {
    request: CaptureRequest,
    script: CaptureScript,
    calls: CallLog,
    open_handles: Arc<AtomicUsize>,
    released: bool,
}

impl CaptureHandle for FakeCaptureHandle {
    fn prepare(&mut self) -> Result<(), DeviceError> {
        self.calls.push("prepare");
        if self.script.fail_prepare {
            return Err(DeviceError::Prepare("scripted prepare failure".into()));
        }
        Ok(())
    }

    fn start(&mut self) -> Result<(), DeviceError> {
        self.calls.push("start");
        if self.script.fail_start {
            return Err(DeviceError::Start("scripted start failure".into()));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        self.calls.push("stop");
        if self.script.fail_stop {
            return Err(DeviceError::Stop("scripted stop failure".into()));
        }
        let bytes: &[u8] = if self.script.write_empty { b"" } else { b"fLaC-fake-audio" };
        std::fs::write(&self.request.output_path, bytes)?;
        Ok(())
    }

    fn release(&mut self) {
        self.calls.push("release");
        if !self.released {
            self.released = true;
            self.open_handles.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[derive(Clone, Default)]
pub struct PlaybackScript {
    pub fail_open: bool,
    pub fail_prepare: bool,
    pub fail_start: bool,
    /// Post `Prepared` as soon as preparation begins
    pub auto_prepare: bool,
}

#[derive(Clone)]
pub struct FakePlaybackDevice {
    script: PlaybackScript,
    calls: CallLog,
    open_handles: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<PlaybackRequest>>>,
    volume: Arc<Mutex<Option<f32>>>,
}

impl FakePlaybackDevice {
    pub fn new(script: PlaybackScript) -> Self {
        Self::with_log(script, CallLog::default())
    }

    pub fn with_log(script: PlaybackScript, calls: CallLog) -> Self {
        Self {
            script,
            calls,
            open_handles: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            volume: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.entries()
    }

    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<PlaybackRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn last_token(&self) -> Option<SessionToken> {
        self.last_request().map(|r| r.token)
    }

    pub fn volume(&self) -> Option<f32> {
        *self.volume.lock().unwrap()
    }
}

impl PlaybackDevice for FakePlaybackDevice {
    fn open(
        &self,
        request: PlaybackRequest,
        events: EventSink,
    ) -> Result<Box<dyn PlaybackHandle>, DeviceError> {
        self.calls.push("playback.open");
        if self.script.fail_open {
            return Err(DeviceError::Open("scripted open failure".into()));
        }
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(Box::new(FakePlaybackHandle {
            token: request.token,
            events,
            script: self.script.clone(),
            calls: self.calls.clone(),
            open_handles: Arc::clone(&self.open_handles),
            volume: Arc::clone(&self.volume),
            playing: false,
            released: false,
        }))
    }
}

struct FakePlaybackHandle {
    token: SessionToken,
    events: EventSink,
    script: PlaybackScript,
    calls: CallLog,
    open_handles: Arc<AtomicUsize>,
    volume: Arc<Mutex<Option<f32>>>,
    playing: bool,
    released: bool,
}

impl PlaybackHandle for FakePlaybackHandle {
    fn prepare_async(&mut self) -> Result<(), DeviceError> {
        self.calls.push("playback.prepare");
        if self.script.fail_prepare {
            return Err(DeviceError::Prepare("scripted prepare failure".into()));
        }
        if self.script.auto_prepare {
            self.events.post(LoopEvent::Playback(PlaybackEvent::Prepared {
                token: self.token,
            }));
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), DeviceError> {
        *self.volume.lock().unwrap() = Some(volume);
        Ok(())
    }

    fn start(&mut self) -> Result<(), DeviceError> {
        self.calls.push("playback.start");
        if self.script.fail_start {
            return Err(DeviceError::Start("scripted start failure".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        self.calls.push("playback.stop");
        self.playing = false;
        Ok(())
    }

    fn release(&mut self) {
        self.calls.push("playback.release");
        if !self.released {
            self.released = true;
            self.open_handles.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

pub struct FakeRouting {
    mode: Mutex<RoutingMode>,
    history: Mutex<Vec<RoutingMode>>,
    fail_set: AtomicBool,
}

impl FakeRouting {
    pub fn new(mode: RoutingMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            history: Mutex::new(Vec::new()),
            fail_set: AtomicBool::new(false),
        }
    }

    pub fn failing(mode: RoutingMode) -> Self {
        let routing = Self::new(mode);
        routing.fail_set.store(true, Ordering::SeqCst);
        routing
    }

    /// Every mode that was successfully set, in order
    pub fn history(&self) -> Vec<RoutingMode> {
        self.history.lock().unwrap().clone()
    }
}

impl AudioRouting for FakeRouting {
    fn mode(&self) -> RoutingMode {
        *self.mode.lock().unwrap()
    }

    fn set_mode(&self, mode: RoutingMode) -> Result<(), RoutingError> {
        if self.fail_set.load(Ordering::SeqCst) && mode == RoutingMode::Normal {
            return Err(RoutingError::SetFailed {
                mode,
                reason: "scripted routing failure".into(),
            });
        }
        *self.mode.lock().unwrap() = mode;
        self.history.lock().unwrap().push(mode);
        Ok(())
    }
}

pub struct FakePermission {
    granted: AtomicBool,
    answer: Option<bool>,
    keeps_refusing: bool,
    requests: Mutex<Vec<u32>>,
}

impl FakePermission {
    pub fn granted() -> Self {
        Self::new(true, None)
    }

    /// Denied until requested; the request is answered with `answer`
    pub fn denied_then(answer: bool) -> Self {
        Self::new(false, Some(answer))
    }

    /// Answers "granted" but the check keeps failing afterwards
    pub fn inconsistent() -> Self {
        Self {
            keeps_refusing: true,
            ..Self::new(false, Some(true))
        }
    }

    fn new(granted: bool, answer: Option<bool>) -> Self {
        Self {
            granted: AtomicBool::new(granted),
            answer,
            keeps_refusing: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<u32> {
        self.requests.lock().unwrap().clone()
    }
}

impl PermissionGate for FakePermission {
    fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request(&self, request_code: u32, events: &EventSink) {
        self.requests.lock().unwrap().push(request_code);
        if let Some(granted) = self.answer {
            if !self.keeps_refusing {
                self.granted.store(granted, Ordering::SeqCst);
            }
            events.post(LoopEvent::Permission {
                request_code,
                granted,
            });
        }
    }
}

pub struct FakeCallControl {
    calls: CallLog,
}

impl FakeCallControl {
    pub fn new(calls: CallLog) -> Self {
        Self { calls }
    }
}

impl CallControl for FakeCallControl {
    fn accept(&self) {
        self.calls.push("call.accept");
    }

    fn reject(&self) {
        self.calls.push("call.reject");
    }

    fn show_call_screen(&self) {
        self.calls.push("call.show_screen");
    }
}
