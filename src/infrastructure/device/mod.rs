//! Output device control adapters
//!
//! Lists, queries and switches the system output device using platform
//! utilities, or reads it through cpal where switching is unsupported.

mod cpal;
mod factory;
mod noop;
mod pactl;
mod switch_audio_source;
mod tool;

pub use self::cpal::CpalDeviceControl;
pub use factory::{create_device_control, detect_device_tool, DeviceTool, DeviceToolPreference};
pub use noop::NoDeviceControl;
pub use pactl::PactlDeviceControl;
pub use switch_audio_source::SwitchAudioSourceControl;
