//! Simulated imaging sensor
//!
//! Register file plus parameter store with the range checks the real driver
//! applies. Lets the control plane run, and be tested, without camera
//! hardware.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::capture::frame::PixelFormat;
use crate::error::SensorError;
use crate::sensor::{PllConfig, SensorControl, SensorResult, WindowConfig};

/// In-memory sensor with hardware-like register semantics
pub struct SimSensor {
    pixel_format: PixelFormat,
    registers: HashMap<i32, i32>,
    params: HashMap<&'static str, i32>,
    pll: PllConfig,
    window: WindowConfig,
}

impl SimSensor {
    pub fn new() -> Self {
        Self::with_pixel_format(PixelFormat::Jpeg)
    }

    pub fn with_pixel_format(pixel_format: PixelFormat) -> Self {
        Self {
            pixel_format,
            registers: HashMap::new(),
            params: HashMap::new(),
            pll: PllConfig::default(),
            window: WindowConfig::default(),
        }
    }

    /// Last accepted value for a named parameter, `None` if never set
    pub fn param(&self, name: &str) -> Option<i32> {
        self.params.get(name).copied()
    }

    pub fn pll(&self) -> PllConfig {
        self.pll
    }

    pub fn window(&self) -> WindowConfig {
        self.window
    }

    fn checked(&mut self, name: &'static str, value: i32, range: RangeInclusive<i32>) -> SensorResult {
        if !range.contains(&value) {
            return Err(SensorError::OutOfRange { param: name, value });
        }
        self.params.insert(name, value);
        Ok(())
    }

    fn flag(&mut self, name: &'static str, on: bool) -> SensorResult {
        self.params.insert(name, on as i32);
        Ok(())
    }
}

impl Default for SimSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorControl for SimSensor {
    fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    fn set_framesize(&mut self, size: i32) -> SensorResult {
        self.checked("framesize", size, 0..=13)
    }

    fn set_quality(&mut self, quality: i32) -> SensorResult {
        self.checked("quality", quality, 0..=63)
    }

    fn set_contrast(&mut self, level: i32) -> SensorResult {
        self.checked("contrast", level, -2..=2)
    }

    fn set_brightness(&mut self, level: i32) -> SensorResult {
        self.checked("brightness", level, -2..=2)
    }

    fn set_saturation(&mut self, level: i32) -> SensorResult {
        self.checked("saturation", level, -2..=2)
    }

    fn set_gain_ceiling(&mut self, ceiling: i32) -> SensorResult {
        self.checked("gainceiling", ceiling, 0..=6)
    }

    fn set_colorbar(&mut self, on: bool) -> SensorResult {
        self.flag("colorbar", on)
    }

    fn set_awb(&mut self, on: bool) -> SensorResult {
        self.flag("awb", on)
    }

    fn set_agc(&mut self, on: bool) -> SensorResult {
        self.flag("agc", on)
    }

    fn set_aec(&mut self, on: bool) -> SensorResult {
        self.flag("aec", on)
    }

    fn set_hmirror(&mut self, on: bool) -> SensorResult {
        self.flag("hmirror", on)
    }

    fn set_vflip(&mut self, on: bool) -> SensorResult {
        self.flag("vflip", on)
    }

    fn set_awb_gain(&mut self, on: bool) -> SensorResult {
        self.flag("awb_gain", on)
    }

    fn set_agc_gain(&mut self, gain: i32) -> SensorResult {
        self.checked("agc_gain", gain, 0..=30)
    }

    fn set_aec_value(&mut self, value: i32) -> SensorResult {
        self.checked("aec_value", value, 0..=1200)
    }

    fn set_aec2(&mut self, on: bool) -> SensorResult {
        self.flag("aec2", on)
    }

    fn set_dcw(&mut self, on: bool) -> SensorResult {
        self.flag("dcw", on)
    }

    fn set_bpc(&mut self, on: bool) -> SensorResult {
        self.flag("bpc", on)
    }

    fn set_wpc(&mut self, on: bool) -> SensorResult {
        self.flag("wpc", on)
    }

    fn set_raw_gma(&mut self, on: bool) -> SensorResult {
        self.flag("raw_gma", on)
    }

    fn set_lenc(&mut self, on: bool) -> SensorResult {
        self.flag("lenc", on)
    }

    fn set_special_effect(&mut self, effect: i32) -> SensorResult {
        self.checked("special_effect", effect, 0..=6)
    }

    fn set_wb_mode(&mut self, mode: i32) -> SensorResult {
        self.checked("wb_mode", mode, 0..=4)
    }

    fn set_ae_level(&mut self, level: i32) -> SensorResult {
        self.checked("ae_level", level, -2..=2)
    }

    fn set_xclk(&mut self, freq_mhz: i32) -> SensorResult {
        self.checked("xclk", freq_mhz, 1..=40)
    }

    fn set_register(&mut self, reg: i32, mask: i32, value: i32) -> SensorResult {
        if !(0..=0xFFFF).contains(&reg) {
            return Err(SensorError::Rejected(format!("bad register address {reg}")));
        }
        let old = self.registers.get(&reg).copied().unwrap_or(0);
        self.registers.insert(reg, (old & !mask) | (value & mask));
        Ok(())
    }

    fn get_register(&mut self, reg: i32, mask: i32) -> Result<i32, SensorError> {
        if !(0..=0xFFFF).contains(&reg) {
            return Err(SensorError::Rejected(format!("bad register address {reg}")));
        }
        Ok(self.registers.get(&reg).copied().unwrap_or(0) & mask)
    }

    fn set_pll(&mut self, pll: PllConfig) -> SensorResult {
        if !(0..=252).contains(&pll.multiplier) {
            return Err(SensorError::OutOfRange {
                param: "pll multiplier",
                value: pll.multiplier,
            });
        }
        self.pll = pll;
        Ok(())
    }

    fn set_window(&mut self, window: WindowConfig) -> SensorResult {
        if window.end_x < window.start_x || window.end_y < window.start_y {
            return Err(SensorError::Rejected(
                "window ends before it starts".to_string(),
            ));
        }
        self.window = window;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_register_write_merges() {
        let mut sensor = SimSensor::new();
        sensor.set_register(0x12, 0xFF, 0xAB).unwrap();
        assert_eq!(sensor.get_register(0x12, 0xFF).unwrap(), 0xAB);

        // Only masked bits change
        sensor.set_register(0x12, 0x0F, 0xFF).unwrap();
        assert_eq!(sensor.get_register(0x12, 0xFF).unwrap(), 0xAF);

        // Read applies the mask too
        assert_eq!(sensor.get_register(0x12, 0xF0).unwrap(), 0xA0);
    }

    #[test]
    fn unwritten_registers_read_zero() {
        let mut sensor = SimSensor::new();
        assert_eq!(sensor.get_register(0x44, 0xFF).unwrap(), 0);
    }

    #[test]
    fn out_of_range_values_rejected() {
        let mut sensor = SimSensor::new();
        assert!(sensor.set_quality(64).is_err());
        assert!(sensor.set_brightness(3).is_err());
        assert!(sensor.set_xclk(0).is_err());
        // State untouched on failure
        assert_eq!(sensor.param("quality"), None);
        assert_eq!(sensor.param("xclk"), None);
    }

    #[test]
    fn accepted_values_are_stored() {
        let mut sensor = SimSensor::new();
        sensor.set_quality(12).unwrap();
        sensor.set_vflip(true).unwrap();
        assert_eq!(sensor.param("quality"), Some(12));
        assert_eq!(sensor.param("vflip"), Some(1));
    }

    #[test]
    fn window_validation() {
        let mut sensor = SimSensor::new();
        let window = WindowConfig {
            start_x: 100,
            end_x: 50,
            ..Default::default()
        };
        assert!(sensor.set_window(window).is_err());

        let window = WindowConfig {
            end_x: 640,
            end_y: 480,
            output_x: 320,
            output_y: 240,
            scale: true,
            ..Default::default()
        };
        sensor.set_window(window).unwrap();
        assert_eq!(sensor.window(), window);
    }
}
