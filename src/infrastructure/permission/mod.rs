//! Microphone permission module

mod input_device;

pub use input_device::InputDevicePermission;
