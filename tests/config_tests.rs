// Host-side tests for construction-time configuration and palettes.

use neural_backdrop::core::constants::*;
use neural_backdrop::core::{
    srgb_hex, BackdropConfig, ColorScheme, ConfigError, Intensity, Palette,
};

#[test]
fn parses_scheme_and_intensity_case_insensitively() {
    assert_eq!("dark".parse::<ColorScheme>(), Ok(ColorScheme::Dark));
    assert_eq!(" Light ".parse::<ColorScheme>(), Ok(ColorScheme::Light));
    assert_eq!("HIGH".parse::<Intensity>(), Ok(Intensity::High));
    assert_eq!("normal".parse::<Intensity>(), Ok(Intensity::Normal));
}

#[test]
fn rejects_unknown_values() {
    assert_eq!(
        "sepia".parse::<ColorScheme>(),
        Err(ConfigError::UnknownColorScheme("sepia".into()))
    );
    let err = "extreme".parse::<Intensity>().unwrap_err();
    assert!(err.to_string().contains("extreme"));
}

#[test]
fn defaults_are_dark_and_normal() {
    let cfg = BackdropConfig::default();
    assert_eq!(cfg.color_scheme, ColorScheme::Dark);
    assert_eq!(cfg.intensity, Intensity::Normal);
    assert!(!cfg.reduced_motion);
    assert_eq!(ColorScheme::default().to_string(), "dark");
    assert_eq!(Intensity::High.to_string(), "high");
}

#[test]
fn counts_follow_intensity() {
    let normal = BackdropConfig::new(ColorScheme::Dark, Intensity::Normal, false);
    let high = BackdropConfig::new(ColorScheme::Light, Intensity::High, false);
    assert_eq!(normal.point_count(), 150);
    assert_eq!(normal.pulse_count(), 24);
    assert_eq!(high.point_count(), 190);
    assert_eq!(high.pulse_count(), 36);
}

#[test]
fn motion_factor_combines_reduction_and_intensity() {
    let cases = [
        (Intensity::Normal, false, 1.0),
        (Intensity::High, false, HIGH_INTENSITY_FACTOR),
        (Intensity::Normal, true, REDUCED_MOTION_FACTOR),
        (Intensity::High, true, REDUCED_MOTION_FACTOR * HIGH_INTENSITY_FACTOR),
    ];
    for (intensity, reduced, expected) in cases {
        let cfg = BackdropConfig::new(ColorScheme::Dark, intensity, reduced);
        assert!((cfg.motion_factor() - expected).abs() < 1e-6);
    }
}

#[test]
fn palettes_differ_by_scheme() {
    let dark = Palette::for_config(&BackdropConfig::new(ColorScheme::Dark, Intensity::Normal, false));
    let light =
        Palette::for_config(&BackdropConfig::new(ColorScheme::Light, Intensity::Normal, false));
    assert_ne!(dark.node, light.node);
    assert!(dark.front.opacity > light.front.opacity);
    assert!(dark.lines.opacity > light.lines.opacity);
    assert!(dark.front.size > dark.back.size);
    assert!(dark.glows[0].base_opacity > light.glows[0].base_opacity);
}

#[test]
fn high_intensity_brightens_dark_glows() {
    let normal = BackdropConfig::new(ColorScheme::Dark, Intensity::Normal, false).palette();
    let high = BackdropConfig::new(ColorScheme::Dark, Intensity::High, false).palette();
    assert!(high.glows[0].base_opacity > normal.glows[0].base_opacity);
    assert!(high.glows[1].base_opacity > normal.glows[1].base_opacity);
}

#[test]
fn reduced_motion_dims_pulses() {
    let full = BackdropConfig::new(ColorScheme::Dark, Intensity::Normal, false).palette();
    let reduced = BackdropConfig::new(ColorScheme::Dark, Intensity::Normal, true).palette();
    assert_eq!(full.pulses.opacity, PULSE_OPACITY);
    assert_eq!(reduced.pulses.opacity, PULSE_OPACITY_REDUCED);
}

#[test]
fn srgb_hex_maps_endpoints_and_channels() {
    assert_eq!(srgb_hex(0x000000), glam::Vec3::ZERO);
    let white = srgb_hex(0xffffff);
    assert!((white - glam::Vec3::ONE).abs().max_element() < 1e-5);
    let green = srgb_hex(0x00ff00);
    assert_eq!(green.x, 0.0);
    assert!((green.y - 1.0).abs() < 1e-5);
    // Mid grey is darker in linear space.
    assert!(srgb_hex(0x808080).x < 0.5);
}
