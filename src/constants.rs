/// Host-side wiring constants for the browser build.
///
/// Simulation tuning lives in `core::constants`; this file only covers how
/// the component attaches to the page.
// Media query sampled once at construction
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Window events the component listens to
pub const POINTER_MOVE_EVENT: &str = "pointermove";
pub const RESIZE_EVENT: &str = "resize";

// Fallback viewport (CSS px) when the window reports no usable size
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 300.0;
pub const FALLBACK_VIEWPORT_HEIGHT: f64 = 150.0;

// Inline style for the canvas: fills the container, sits behind content and
// never takes pointer events away from it.
pub const CANVAS_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("inset", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("display", "block"),
    ("pointer-events", "none"),
];
