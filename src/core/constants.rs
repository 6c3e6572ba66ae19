use glam::Vec3;

// Simulation tuning constants shared by the scene, its tests and the renderer.

// Point field
pub const POINT_COUNT_NORMAL: usize = 150;
pub const POINT_COUNT_HIGH: usize = 190;
pub const FIELD_HALF_EXTENT: Vec3 = Vec3::new(10.0, 10.0, 5.0); // anchors and bounce box
pub const INITIAL_SPEED_SPAN: f32 = 0.02; // per-axis velocity range before motion scaling

// Motion scaling
pub const HIGH_INTENSITY_FACTOR: f32 = 1.25;
pub const REDUCED_MOTION_FACTOR: f32 = 0.25;

// Spring back toward the anchor (x/y looser than z)
pub const ANCHOR_GAIN: Vec3 = Vec3::new(0.00005, 0.00005, 0.00004);

// Pointer interaction
pub const POINTER_WORLD_SCALE: Vec3 = Vec3::new(9.0, 5.0, 0.0); // normalized pointer -> world plane
pub const POINTER_CAPTURE_RADIUS_SQ: f32 = 9.0;
pub const POINTER_MIN_DISTANCE: f32 = 0.3; // clamps the 1/d direction normalizer
pub const POINTER_FORCE: f32 = 0.012;

// Back layer projection
pub const BACK_LAYER_SCALE: f32 = 0.92;
pub const BACK_LAYER_Z_OFFSET: f32 = -2.0;

// Twinkle
pub const TWINKLE_BASE: f32 = 0.65;
pub const TWINKLE_SPAN: f32 = 0.35;
pub const TWINKLE_SPEED: f32 = 1.8; // radians per second before motion scaling
pub const BACK_BRIGHTNESS_BASE: f32 = 0.45;
pub const BACK_BRIGHTNESS_SPAN: f32 = 0.2;

// Proximity graph
pub const LINK_DISTANCE: f32 = 2.5;

// Pulses
pub const PULSE_COUNT_NORMAL: usize = 24;
pub const PULSE_COUNT_HIGH: usize = 36;
pub const PULSE_SPEED_MIN: f32 = 0.004;
pub const PULSE_SPEED_SPAN: f32 = 0.01;
pub const PULSE_HIDDEN_POSITION: Vec3 = Vec3::splat(1000.0); // far outside the frustum
pub const PULSE_OPACITY: f32 = 0.5;
pub const PULSE_OPACITY_REDUCED: f32 = 0.2;

// Layer drift (radians per frame before motion scaling)
pub const FRONT_YAW_STEP: f32 = 0.0007;
pub const BACK_YAW_STEP: f32 = -0.0003;
pub const LINE_YAW_STEP: f32 = 0.0006;
pub const LINE_PITCH_AMPLITUDE: f32 = 0.015;
pub const LINE_PITCH_SPEED: f32 = 0.25;

// Camera parallax
pub const CAMERA_DISTANCE: f32 = 5.0;
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const PARALLAX_RANGE_X: f32 = 0.25;
pub const PARALLAX_RANGE_Y: f32 = 0.2;
pub const PARALLAX_FOLLOW: f32 = 0.03; // fraction of the gap closed per frame

// Glow sprites
pub const GLOW_SCALE: f32 = 8.0;
