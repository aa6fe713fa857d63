//! Named parameter dispatch
//!
//! Closed set of sensor tunables addressable through `/control?var=<name>`.
//! Unknown names are rejected at lookup, before any device call; each known
//! name maps to exactly one typed setter.

use crate::capture::frame::PixelFormat;
use crate::sensor::{SensorControl, SensorResult};

/// One named sensor operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorCommand {
    FrameSize,
    Quality,
    Contrast,
    Brightness,
    Saturation,
    GainCeiling,
    ColorBar,
    AutoWhiteBalance,
    AutoGain,
    AutoExposure,
    HMirror,
    VFlip,
    AwbGain,
    AgcGain,
    AecValue,
    AecDsp,
    Dcw,
    Bpc,
    Wpc,
    RawGamma,
    LensCorrection,
    SpecialEffect,
    WhiteBalanceMode,
    AeLevel,
}

impl SensorCommand {
    /// Exact-match lookup of a query `var` name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "framesize" => Self::FrameSize,
            "quality" => Self::Quality,
            "contrast" => Self::Contrast,
            "brightness" => Self::Brightness,
            "saturation" => Self::Saturation,
            "gainceiling" => Self::GainCeiling,
            "colorbar" => Self::ColorBar,
            "awb" => Self::AutoWhiteBalance,
            "agc" => Self::AutoGain,
            "aec" => Self::AutoExposure,
            "hmirror" => Self::HMirror,
            "vflip" => Self::VFlip,
            "awb_gain" => Self::AwbGain,
            "agc_gain" => Self::AgcGain,
            "aec_value" => Self::AecValue,
            "aec2" => Self::AecDsp,
            "dcw" => Self::Dcw,
            "bpc" => Self::Bpc,
            "wpc" => Self::Wpc,
            "raw_gma" => Self::RawGamma,
            "lenc" => Self::LensCorrection,
            "special_effect" => Self::SpecialEffect,
            "wb_mode" => Self::WhiteBalanceMode,
            "ae_level" => Self::AeLevel,
            _ => return None,
        })
    }

    /// Query name of the command, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::FrameSize => "framesize",
            Self::Quality => "quality",
            Self::Contrast => "contrast",
            Self::Brightness => "brightness",
            Self::Saturation => "saturation",
            Self::GainCeiling => "gainceiling",
            Self::ColorBar => "colorbar",
            Self::AutoWhiteBalance => "awb",
            Self::AutoGain => "agc",
            Self::AutoExposure => "aec",
            Self::HMirror => "hmirror",
            Self::VFlip => "vflip",
            Self::AwbGain => "awb_gain",
            Self::AgcGain => "agc_gain",
            Self::AecValue => "aec_value",
            Self::AecDsp => "aec2",
            Self::Dcw => "dcw",
            Self::Bpc => "bpc",
            Self::Wpc => "wpc",
            Self::RawGamma => "raw_gma",
            Self::LensCorrection => "lenc",
            Self::SpecialEffect => "special_effect",
            Self::WhiteBalanceMode => "wb_mode",
            Self::AeLevel => "ae_level",
        }
    }

    /// Apply the command with its single integer argument.
    ///
    /// Frame size changes are only forwarded while the sensor outputs JPEG;
    /// on any other pixel format the request succeeds without a device call.
    pub fn apply(self, sensor: &mut dyn SensorControl, value: i32) -> SensorResult {
        let on = value != 0;
        match self {
            Self::FrameSize => {
                if sensor.pixel_format() == PixelFormat::Jpeg {
                    sensor.set_framesize(value)
                } else {
                    Ok(())
                }
            }
            Self::Quality => sensor.set_quality(value),
            Self::Contrast => sensor.set_contrast(value),
            Self::Brightness => sensor.set_brightness(value),
            Self::Saturation => sensor.set_saturation(value),
            Self::GainCeiling => sensor.set_gain_ceiling(value),
            Self::ColorBar => sensor.set_colorbar(on),
            Self::AutoWhiteBalance => sensor.set_awb(on),
            Self::AutoGain => sensor.set_agc(on),
            Self::AutoExposure => sensor.set_aec(on),
            Self::HMirror => sensor.set_hmirror(on),
            Self::VFlip => sensor.set_vflip(on),
            Self::AwbGain => sensor.set_awb_gain(on),
            Self::AgcGain => sensor.set_agc_gain(value),
            Self::AecValue => sensor.set_aec_value(value),
            Self::AecDsp => sensor.set_aec2(on),
            Self::Dcw => sensor.set_dcw(on),
            Self::Bpc => sensor.set_bpc(on),
            Self::Wpc => sensor.set_wpc(on),
            Self::RawGamma => sensor.set_raw_gma(on),
            Self::LensCorrection => sensor.set_lenc(on),
            Self::SpecialEffect => sensor.set_special_effect(value),
            Self::WhiteBalanceMode => sensor.set_wb_mode(value),
            Self::AeLevel => sensor.set_ae_level(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SimSensor;

    const ALL_NAMES: [&str; 24] = [
        "framesize",
        "quality",
        "contrast",
        "brightness",
        "saturation",
        "gainceiling",
        "colorbar",
        "awb",
        "agc",
        "aec",
        "hmirror",
        "vflip",
        "awb_gain",
        "agc_gain",
        "aec_value",
        "aec2",
        "dcw",
        "bpc",
        "wpc",
        "raw_gma",
        "lenc",
        "special_effect",
        "wb_mode",
        "ae_level",
    ];

    #[test]
    fn every_name_resolves_and_round_trips() {
        for name in ALL_NAMES {
            let cmd = SensorCommand::from_name(name)
                .unwrap_or_else(|| panic!("{name} should resolve"));
            assert_eq!(cmd.name(), name);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(SensorCommand::from_name("night_mode"), None);
        assert_eq!(SensorCommand::from_name(""), None);
        // Lookup is exact-match, not prefix
        assert_eq!(SensorCommand::from_name("qualityx"), None);
        assert_eq!(SensorCommand::from_name("Quality"), None);
    }

    #[test]
    fn quality_reaches_the_sensor() {
        let mut sensor = SimSensor::new();
        SensorCommand::Quality.apply(&mut sensor, 10).unwrap();
        assert_eq!(sensor.param("quality"), Some(10));
    }

    #[test]
    fn boolean_commands_coerce_nonzero_to_on() {
        let mut sensor = SimSensor::new();
        SensorCommand::VFlip.apply(&mut sensor, 2).unwrap();
        assert_eq!(sensor.param("vflip"), Some(1));
        SensorCommand::VFlip.apply(&mut sensor, 0).unwrap();
        assert_eq!(sensor.param("vflip"), Some(0));
    }

    #[test]
    fn framesize_skipped_on_non_jpeg_sensor() {
        use crate::capture::frame::PixelFormat;

        let mut sensor = SimSensor::with_pixel_format(PixelFormat::Rgb565);
        // Succeeds but must not touch the device
        SensorCommand::FrameSize.apply(&mut sensor, 5).unwrap();
        assert_eq!(sensor.param("framesize"), None);

        let mut jpeg_sensor = SimSensor::new();
        SensorCommand::FrameSize.apply(&mut jpeg_sensor, 5).unwrap();
        assert_eq!(jpeg_sensor.param("framesize"), Some(5));
    }
}
