use glam::Vec2;
use reef_defence_core::CameraTuning;

/// Per-frame camera intent derived from the raw input snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraInput {
    /// Held pan direction, each axis in `[-1, 1]`.
    pub pan: Vec2,
    /// Mouse movement in screen pixels while the drag button is held.
    pub drag: Option<Vec2>,
    /// Wheel movement this frame; only its sign is used.
    pub wheel: f32,
}

/// 2D camera looking at the map with no rotation and no screen offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    target: Vec2,
    zoom: f32,
}

impl Camera {
    /// Creates a camera centred on `target` at unit zoom.
    #[must_use]
    pub const fn new(target: Vec2) -> Self {
        Self {
            target,
            zoom: 1.0,
        }
    }

    /// World position shown at the top-left of the screen.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Current magnification factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Converts a screen pixel into world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.target
    }

    /// Converts a world position into screen pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.zoom
    }

    pub(crate) fn apply(&mut self, input: &CameraInput, tuning: &CameraTuning, dt: f32) {
        let pan = input.pan.clamp(Vec2::NEG_ONE, Vec2::ONE);
        self.target += pan * tuning.pan_speed * dt / self.zoom;

        if let Some(delta) = input.drag {
            self.target -= delta * tuning.drag_speed / self.zoom;
        }

        if input.wheel > 0.0 {
            self.zoom += tuning.zoom_speed * dt;
        } else if input.wheel < 0.0 {
            self.zoom -= tuning.zoom_speed * dt;
        }
        // `min`/`max` skip NaN bounds where `clamp` would panic.
        self.zoom = self.zoom.min(tuning.max_zoom).max(tuning.min_zoom);
    }
}
