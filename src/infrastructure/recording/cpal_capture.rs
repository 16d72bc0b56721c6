//! Microphone capture using cpal
//!
//! Each session runs a worker thread that owns the `cpal::Stream` (which is
//! not `Send`). The handle talks to it over a command channel. Samples are
//! mixed down to mono at the device rate; on stop the worker resamples,
//! encodes and writes the FLAC clip, so none of that runs on the caller.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, error, warn};

use super::flac_encoder::encode_flac;
use super::pcm::{downmix, f32_to_i16, resample};
use crate::application::events::{EventSink, RecorderEvent, SessionToken};
use crate::application::ports::{
    CaptureDevice, CaptureFormat, CaptureHandle, CaptureRequest, DeviceError,
};

/// Opens capture sessions on the default input device
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalCaptureDevice;

impl CpalCaptureDevice {
    pub fn new() -> Self {
        Self
    }

    fn input_device() -> Result<cpal::Device, DeviceError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(DeviceError::NoDevice)
    }

    /// Pick an i16/f32 input config, preferring fewer channels and one that
    /// covers the target rate
    fn input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), DeviceError> {
        let ranges = device
            .supported_input_configs()
            .map_err(|e| DeviceError::Prepare(format!("Failed to get configs: {}", e)))?;

        let covers = |range: &cpal::SupportedStreamConfigRange| {
            range.min_sample_rate().0 <= target_rate && range.max_sample_rate().0 >= target_rate
        };

        let mut best: Option<cpal::SupportedStreamConfigRange> = None;
        for range in ranges {
            if !matches!(range.sample_format(), SampleFormat::I16 | SampleFormat::F32) {
                continue;
            }
            let better = match &best {
                None => true,
                Some(current) => {
                    range.channels() < current.channels() || (covers(&range) && !covers(current))
                }
            };
            if better {
                best = Some(range);
            }
        }

        let range = best.ok_or_else(|| DeviceError::Prepare("No suitable config found".into()))?;
        let sample_rate = if covers(&range) {
            SampleRate(target_rate)
        } else {
            range.min_sample_rate()
        };

        Ok((
            StreamConfig {
                channels: range.channels(),
                sample_rate,
                buffer_size: cpal::BufferSize::Default,
            },
            range.sample_format(),
        ))
    }
}

impl CaptureDevice for CpalCaptureDevice {
    fn open(
        &self,
        request: CaptureRequest,
        events: EventSink,
    ) -> Result<Box<dyn CaptureHandle>, DeviceError> {
        // Fail fast when there is no microphone at all
        Self::input_device()?;
        debug!("Opened capture session {}", request.token);
        Ok(Box::new(CpalCaptureHandle::new(request, events)))
    }
}

enum WorkerCommand {
    Start,
    /// Stop capturing, write the clip and exit
    Finish,
    Shutdown,
}

/// State shared between the handle and the stream callback
struct CaptureBuffer {
    samples: Mutex<Vec<i16>>,
    capturing: AtomicBool,
    cap_reported: AtomicBool,
    device_rate: AtomicU32,
}

impl CaptureBuffer {
    fn new() -> Self {
        Self {
            samples: Mutex::new(Vec::new()),
            capturing: AtomicBool::new(false),
            cap_reported: AtomicBool::new(false),
            device_rate: AtomicU32::new(0),
        }
    }

    fn take(&self) -> Vec<i16> {
        let mut samples = self.samples.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *samples)
    }
}

struct Worker {
    commands: Sender<WorkerCommand>,
    acks: Receiver<Result<(), DeviceError>>,
    thread: JoinHandle<()>,
}

pub struct CpalCaptureHandle {
    request: CaptureRequest,
    events: EventSink,
    buffer: Arc<CaptureBuffer>,
    worker: Option<Worker>,
}

impl CpalCaptureHandle {
    fn new(request: CaptureRequest, events: EventSink) -> Self {
        Self {
            request,
            events,
            buffer: Arc::new(CaptureBuffer::new()),
            worker: None,
        }
    }

    fn shutdown_worker(&mut self) {
        self.buffer.capturing.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.commands.send(WorkerCommand::Shutdown);
            if worker.thread.join().is_err() {
                warn!("Capture worker panicked");
            }
        }
    }

    /// Send a command and wait for the worker's answer
    fn round_trip(&self, command: WorkerCommand, exited: DeviceError) -> Result<(), DeviceError> {
        let worker = self.worker.as_ref().ok_or_else(|| exited.clone())?;
        if worker.commands.send(command).is_err() {
            return Err(exited);
        }
        wait_for_worker(|| worker.acks.recv()).unwrap_or(Err(exited))
    }
}

impl CaptureHandle for CpalCaptureHandle {
    fn prepare(&mut self) -> Result<(), DeviceError> {
        if self.worker.is_some() {
            return Ok(());
        }

        let (commands, command_rx) = mpsc::channel();
        let (ack_tx, acks) = mpsc::sync_channel(1);
        let context = WorkerContext {
            request: self.request.clone(),
            events: self.events.clone(),
            buffer: Arc::clone(&self.buffer),
        };

        let thread = std::thread::Builder::new()
            .name("hold-notice-capture".into())
            .spawn(move || context.run(command_rx, ack_tx))
            .map_err(|e| DeviceError::Prepare(e.to_string()))?;

        let ready = wait_for_worker(|| acks.recv())
            .unwrap_or_else(|_| Err(DeviceError::Prepare("Capture worker exited".into())));
        self.worker = Some(Worker {
            commands,
            acks,
            thread,
        });
        if ready.is_err() {
            self.shutdown_worker();
        }
        ready
    }

    fn start(&mut self) -> Result<(), DeviceError> {
        if self.worker.is_none() {
            return Err(DeviceError::Start("Device not prepared".into()));
        }
        self.round_trip(
            WorkerCommand::Start,
            DeviceError::Start("Capture worker exited".into()),
        )
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        if self.worker.is_none() {
            return Err(DeviceError::Stop("Device not started".into()));
        }
        let finished = self.round_trip(
            WorkerCommand::Finish,
            DeviceError::Stop("Capture worker exited".into()),
        );
        self.shutdown_worker();
        finished
    }

    fn release(&mut self) {
        self.shutdown_worker();
    }
}

impl Drop for CpalCaptureHandle {
    fn drop(&mut self) {
        self.shutdown_worker();
    }
}

/// Everything the worker thread needs, moved into it
struct WorkerContext {
    request: CaptureRequest,
    events: EventSink,
    buffer: Arc<CaptureBuffer>,
}

impl WorkerContext {
    fn run(self, commands: Receiver<WorkerCommand>, acks: SyncSender<Result<(), DeviceError>>) {
        let stream = match self.build_stream() {
            Ok(stream) => {
                let _ = acks.send(Ok(()));
                stream
            }
            Err(e) => {
                let _ = acks.send(Err(e));
                return;
            }
        };

        while let Ok(command) = commands.recv() {
            match command {
                WorkerCommand::Start => {
                    self.buffer.capturing.store(true, Ordering::SeqCst);
                    let started = stream.play().map_err(|e| DeviceError::Start(e.to_string()));
                    if started.is_err() {
                        self.buffer.capturing.store(false, Ordering::SeqCst);
                    }
                    let _ = acks.send(started);
                }
                WorkerCommand::Finish => {
                    self.buffer.capturing.store(false, Ordering::SeqCst);
                    drop(stream);
                    let _ = acks.send(finalize_clip(&self.buffer, &self.request));
                    debug!("Capture worker for session {} finished", self.request.token);
                    return;
                }
                WorkerCommand::Shutdown => break,
            }
        }

        drop(stream);
        debug!("Capture worker for session {} exited", self.request.token);
    }

    fn build_stream(&self) -> Result<cpal::Stream, DeviceError> {
        let device = CpalCaptureDevice::input_device()?;
        let (config, sample_format) =
            CpalCaptureDevice::input_config(&device, self.request.format.sample_rate)?;

        let channels = config.channels;
        let device_rate = config.sample_rate.0;
        self.buffer.device_rate.store(device_rate, Ordering::SeqCst);
        let max_samples = cap_in_samples(self.request.max_duration.as_millis(), device_rate);

        let sink = SampleSink {
            buffer: Arc::clone(&self.buffer),
            events: self.events.clone(),
            token: self.request.token,
            channels,
            max_samples,
        };
        let on_error = |err: cpal::StreamError| error!("Audio input stream error: {}", err);

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| sink.push(data),
                on_error,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let converted: Vec<i16> = data.iter().map(|&s| f32_to_i16(s)).collect();
                    sink.push(&converted);
                },
                on_error,
                None,
            ),
            other => {
                return Err(DeviceError::Prepare(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        };

        stream.map_err(|e| DeviceError::Prepare(e.to_string()))
    }
}

/// Resample, encode and write everything captured so far
fn finalize_clip(buffer: &CaptureBuffer, request: &CaptureRequest) -> Result<(), DeviceError> {
    let samples = buffer.take();
    if samples.is_empty() {
        return Err(DeviceError::Stop("No audio data captured".into()));
    }

    let format = request.format;
    let device_rate = buffer.device_rate.load(Ordering::SeqCst);
    let pcm = resample(&samples, device_rate, format.sample_rate)?;
    let bytes = encode_flac(&pcm, format)?;

    std::fs::write(&request.output_path, bytes)?;
    debug!("Wrote {} samples to {}", pcm.len(), request.output_path.display());
    Ok(())
}

/// Block on the worker. On a multi-threaded runtime the other tasks of
/// this runtime thread move elsewhere while we wait.
fn wait_for_worker<T>(wait: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(wait)
        }
        _ => wait(),
    }
}

/// Number of mono samples at `rate` that make up `millis`
fn cap_in_samples(millis: u64, rate: u32) -> usize {
    (millis * u64::from(rate) / 1000) as usize
}

/// Appends callback data and reports the duration cap once
struct SampleSink {
    buffer: Arc<CaptureBuffer>,
    events: EventSink,
    token: SessionToken,
    channels: u16,
    max_samples: usize,
}

impl SampleSink {
    fn push(&self, data: &[i16]) {
        if !self.buffer.capturing.load(Ordering::SeqCst) {
            return;
        }

        let mono = downmix(data, self.channels);
        let len = {
            let Ok(mut samples) = self.buffer.samples.lock() else {
                return;
            };
            let room = self.max_samples.saturating_sub(samples.len());
            samples.extend_from_slice(&mono[..mono.len().min(room)]);
            samples.len()
        };

        if len >= self.max_samples && !self.buffer.cap_reported.swap(true, Ordering::SeqCst) {
            self.buffer.capturing.store(false, Ordering::SeqCst);
            self.events
                .post(RecorderEvent::MaxDurationReached { token: self.token });
        }
    }
}
