//! Sensor control seam
//!
//! The control plane talks to the imaging sensor through [`SensorControl`]:
//! typed setters for the named tunables, plus raw register, PLL, master-clock
//! and capture-window access for the low-level endpoints.

pub mod command;
pub mod sim;

pub use command::SensorCommand;
pub use sim::SimSensor;

use crate::capture::frame::PixelFormat;
use crate::error::SensorError;

/// Result of a single device mutation
pub type SensorResult = Result<(), SensorError>;

/// PLL configuration, applied atomically as one device call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PllConfig {
    pub bypass: i32,
    pub multiplier: i32,
    pub sys_div: i32,
    pub root_div: i32,
    pub pre_div: i32,
    pub seld5: i32,
    pub pclk_enable: i32,
    pub pclk_div: i32,
}

/// Raw capture window, applied atomically as one device call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowConfig {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub total_x: i32,
    pub total_y: i32,
    pub output_x: i32,
    pub output_y: i32,
    pub scale: bool,
    pub binning: bool,
}

/// Named and low-level mutations of the imaging sensor.
///
/// Every operation maps to exactly one device call with success/failure
/// semantics and no richer result, matching the register-level interface of
/// the hardware.
pub trait SensorControl: Send {
    fn pixel_format(&self) -> PixelFormat;

    fn set_framesize(&mut self, size: i32) -> SensorResult;
    fn set_quality(&mut self, quality: i32) -> SensorResult;
    fn set_contrast(&mut self, level: i32) -> SensorResult;
    fn set_brightness(&mut self, level: i32) -> SensorResult;
    fn set_saturation(&mut self, level: i32) -> SensorResult;
    fn set_gain_ceiling(&mut self, ceiling: i32) -> SensorResult;
    fn set_colorbar(&mut self, on: bool) -> SensorResult;
    fn set_awb(&mut self, on: bool) -> SensorResult;
    fn set_agc(&mut self, on: bool) -> SensorResult;
    fn set_aec(&mut self, on: bool) -> SensorResult;
    fn set_hmirror(&mut self, on: bool) -> SensorResult;
    fn set_vflip(&mut self, on: bool) -> SensorResult;
    fn set_awb_gain(&mut self, on: bool) -> SensorResult;
    fn set_agc_gain(&mut self, gain: i32) -> SensorResult;
    fn set_aec_value(&mut self, value: i32) -> SensorResult;
    fn set_aec2(&mut self, on: bool) -> SensorResult;
    fn set_dcw(&mut self, on: bool) -> SensorResult;
    fn set_bpc(&mut self, on: bool) -> SensorResult;
    fn set_wpc(&mut self, on: bool) -> SensorResult;
    fn set_raw_gma(&mut self, on: bool) -> SensorResult;
    fn set_lenc(&mut self, on: bool) -> SensorResult;
    fn set_special_effect(&mut self, effect: i32) -> SensorResult;
    fn set_wb_mode(&mut self, mode: i32) -> SensorResult;
    fn set_ae_level(&mut self, level: i32) -> SensorResult;

    /// Set the master clock frequency in MHz
    fn set_xclk(&mut self, freq_mhz: i32) -> SensorResult;

    /// Masked register write, bypassing the named parameters
    fn set_register(&mut self, reg: i32, mask: i32, value: i32) -> SensorResult;

    /// Masked register read; returns the masked value
    fn get_register(&mut self, reg: i32, mask: i32) -> Result<i32, SensorError>;

    fn set_pll(&mut self, pll: PllConfig) -> SensorResult;
    fn set_window(&mut self, window: WindowConfig) -> SensorResult;
}
