use glam::Vec2;

/// Latest pointer sample written by the move listener and read by the next tick.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Normalized device coordinates: x right, y up, [-1, 1] inside the viewport.
    pub ndc: Vec2,
    /// Set by the listener, cleared once the frame has consumed the sample.
    pub dirty: bool,
}

impl PointerState {
    pub fn record(&mut self, ndc: Vec2) {
        self.ndc = ndc;
        self.dirty = true;
    }

    /// Return the pending sample, if any, and mark it consumed.
    pub fn take(&mut self) -> Option<Vec2> {
        if self.dirty {
            self.dirty = false;
            Some(self.ndc)
        } else {
            None
        }
    }
}

/// Map client pixel coordinates to normalized device coordinates.
///
/// Returns `None` when the viewport is empty or any input is not finite, so a
/// malformed event is simply ignored.
#[inline]
pub fn normalize_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> Option<Vec2> {
    if !(client_x.is_finite() && client_y.is_finite() && width.is_finite() && height.is_finite()) {
        return None;
    }
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let x = (client_x / width) * 2.0 - 1.0;
    let y = -((client_y / height) * 2.0 - 1.0);
    Some(Vec2::new(x as f32, y as f32))
}
