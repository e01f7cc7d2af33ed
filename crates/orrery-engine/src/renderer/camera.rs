use glam::Vec3;

/// Perspective orbit camera.
///
/// Zoom is modeled as a desired dolly distance eased toward each frame
/// when damping is enabled, matching the feel of damped orbit controls.
/// Drag interaction itself is the host's concern; the core only owns the
/// dolly axis, because the control surface exposes a zoom operation.
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_enabled: bool,
    pub damping_factor: f32,
    desired_distance: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 100.0),
            target: Vec3::ZERO,
            fov_y_deg: 60.0,
            aspect,
            near: 0.1,
            far: 10_000.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            damping_enabled: true,
            damping_factor: 0.05,
            desired_distance: 100.0,
        }
    }

    /// Place the camera and aim it, resetting the dolly state.
    pub fn look_from(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
        self.desired_distance = self.distance();
    }

    /// Current distance from the target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Dolly outward by a multiplicative factor (factor < 1 zooms in).
    /// Clamped to the configured distance limits.
    pub fn dolly_out(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.desired_distance =
            (self.desired_distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Advance the damping state one step: ease the actual distance
    /// toward the desired distance and reposition along the view ray.
    pub fn update(&mut self) {
        let current = self.distance();
        let next = if self.damping_enabled {
            current + (self.desired_distance - current) * self.damping_factor
        } else {
            self.desired_distance
        };
        let dir = (self.position - self.target)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        self.position = self.target + dir * next;
    }

    /// Keep the projection in sync with the container on resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}
