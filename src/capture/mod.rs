//! Capture subsystem: seams to the camera, microphone and motion hardware

pub mod audio;
pub mod cpal_input;
pub mod frame;
pub mod motion;
pub mod synthetic;

pub use audio::AudioSource;
pub use cpal_input::CpalAudioSource;
pub use frame::{Frame, FrameSource, PixelFormat};
pub use motion::{LevelMotion, MotionInput};
pub use synthetic::{SineAudioSource, TestPatternCamera};
