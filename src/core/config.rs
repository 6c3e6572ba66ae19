//! Construction-time configuration and the per-theme palette derived from it.
//!
//! A [`BackdropConfig`] is read once when a background is mounted. Changing
//! the color scheme or intensity means disposing the old instance and building
//! a new one; nothing here supports in-place reconfiguration.

use super::constants::*;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown color scheme `{0}` (expected \"light\" or \"dark\")")]
    UnknownColorScheme(String),
    #[error("unknown intensity `{0}` (expected \"normal\" or \"high\")")]
    UnknownIntensity(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl FromStr for ColorScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ConfigError::UnknownColorScheme(s.to_string())),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intensity {
    #[default]
    Normal,
    High,
}

impl FromStr for Intensity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            _ => Err(ConfigError::UnknownIntensity(s.to_string())),
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::High => "high",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackdropConfig {
    pub color_scheme: ColorScheme,
    pub intensity: Intensity,
    /// Host `prefers-reduced-motion` preference, sampled at construction.
    pub reduced_motion: bool,
}

impl BackdropConfig {
    pub fn new(color_scheme: ColorScheme, intensity: Intensity, reduced_motion: bool) -> Self {
        Self {
            color_scheme,
            intensity,
            reduced_motion,
        }
    }

    pub fn point_count(&self) -> usize {
        match self.intensity {
            Intensity::Normal => POINT_COUNT_NORMAL,
            Intensity::High => POINT_COUNT_HIGH,
        }
    }

    pub fn pulse_count(&self) -> usize {
        match self.intensity {
            Intensity::Normal => PULSE_COUNT_NORMAL,
            Intensity::High => PULSE_COUNT_HIGH,
        }
    }

    pub fn intensity_factor(&self) -> f32 {
        match self.intensity {
            Intensity::Normal => 1.0,
            Intensity::High => HIGH_INTENSITY_FACTOR,
        }
    }

    /// Single scalar applied to velocities, forces, drift and twinkle speed.
    pub fn motion_factor(&self) -> f32 {
        let reduced = if self.reduced_motion {
            REDUCED_MOTION_FACTOR
        } else {
            1.0
        };
        reduced * self.intensity_factor()
    }

    pub fn palette(&self) -> Palette {
        Palette::for_config(self)
    }
}

/// Visual constants for one material layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStyle {
    pub color: Vec3,
    pub size: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle {
    pub color: Vec3,
    pub base_opacity: f32,
}

/// Per-theme colors, sizes and opacities. Colors are linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub node: Vec3,
    pub front: LayerStyle,
    pub back: LayerStyle,
    pub lines: LayerStyle,
    pub pulses: LayerStyle,
    pub glows: [GlowStyle; 2],
}

impl Palette {
    pub fn for_config(config: &BackdropConfig) -> Self {
        let high = config.intensity == Intensity::High;
        let pulse_opacity = if config.reduced_motion {
            PULSE_OPACITY_REDUCED
        } else {
            PULSE_OPACITY
        };
        match config.color_scheme {
            ColorScheme::Dark => {
                let node = srgb_hex(0x00ff88);
                Self {
                    node,
                    front: LayerStyle {
                        color: node,
                        size: 0.2,
                        opacity: 0.9,
                    },
                    back: LayerStyle {
                        color: node,
                        size: 0.14,
                        opacity: 0.4,
                    },
                    lines: LayerStyle {
                        color: node,
                        size: 0.0,
                        opacity: 0.4,
                    },
                    pulses: LayerStyle {
                        color: srgb_hex(0xf4b448),
                        size: 0.11,
                        opacity: pulse_opacity,
                    },
                    glows: [
                        GlowStyle {
                            color: srgb_hex(0x046241),
                            base_opacity: if high { 0.08 } else { 0.06 },
                        },
                        GlowStyle {
                            color: srgb_hex(0xf4b448),
                            base_opacity: if high { 0.06 } else { 0.045 },
                        },
                    ],
                }
            }
            ColorScheme::Light => {
                let node = srgb_hex(0x046241);
                Self {
                    node,
                    front: LayerStyle {
                        color: node,
                        size: 0.15,
                        opacity: 0.4,
                    },
                    back: LayerStyle {
                        color: node,
                        size: 0.1,
                        opacity: 0.2,
                    },
                    lines: LayerStyle {
                        color: node,
                        size: 0.0,
                        opacity: 0.1,
                    },
                    pulses: LayerStyle {
                        color: srgb_hex(0x78caa5),
                        size: 0.09,
                        opacity: pulse_opacity,
                    },
                    glows: [
                        GlowStyle {
                            color: srgb_hex(0x00ff88),
                            base_opacity: 0.03,
                        },
                        GlowStyle {
                            color: srgb_hex(0x046241),
                            base_opacity: 0.025,
                        },
                    ],
                }
            }
        }
    }
}

/// Convert a packed `0xRRGGBB` sRGB color into linear RGB.
pub fn srgb_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
