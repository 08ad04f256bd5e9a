use glam::{Mat4, Vec3};

/// Eye height of the figure when standing still.
pub const EYE_HEIGHT: f32 = 1.6;
/// Base pitch is clamped to +/- this many degrees.
pub const MAX_PITCH: f32 = 45.0;
/// Degrees of pitch per pixel of vertical mouse travel.
pub const MOUSE_SENSITIVITY: f32 = 0.1;
/// Bob is amplified by this factor when folded into the effective pitch.
const BOB_PITCH_GAIN: f32 = 100.0;

pub struct Camera {
    /// Resting position of the eye; `y` is the unbobbed eye height.
    pub pos: Vec3,
    /// Yaw in degrees. Fixed at -90 so the camera looks down -Z.
    pub yaw: f32,
    /// Mouse-driven pitch in degrees, always within `[-MAX_PITCH, MAX_PITCH]`.
    pub base_pitch: f32,
    /// Vertical running bob, in world units.
    pub bob: f32,
    /// Whether the camera is locked onto the watch face.
    pub watch_view: bool,
    /// Vertical FOV in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    /// The near plane of the camera, anything closer than this will not be rendered
    pub near: f32,
    /// The far plane of the camera, anything beyond this will not be rendered
    pub far: f32,
}

impl Camera {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            yaw: -90.0,
            base_pitch: 0.0,
            bob: 0.0,
            watch_view: false,
            fov: 60.0,
            aspect_ratio,
            near: 0.1,
            far: 200.0,
        }
    }

    /// Applies a vertical mouse offset (pixels, positive = up). Ignored while
    /// the watch face has focus.
    pub fn apply_mouse_pitch(&mut self, offset_y: f32) {
        if self.watch_view {
            return;
        }
        self.base_pitch = (self.base_pitch + offset_y * MOUSE_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn toggle_watch_view(&mut self) -> bool {
        self.watch_view = !self.watch_view;
        self.watch_view
    }

    pub fn effective_pitch(&self) -> f32 {
        self.base_pitch + self.bob * BOB_PITCH_GAIN
    }

    /// Eye position with the bob applied.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(self.pos.x, EYE_HEIGHT + self.bob, self.pos.z)
    }

    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.effective_pitch().to_radians();
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        Mat4::look_at_rh(eye, eye + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_down_negative_z() {
        let cam = Camera::new(16.0 / 9.0);
        let f = cam.forward();
        assert!(f.z < -0.999);
        assert!(f.x.abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::new(1.0);
        cam.apply_mouse_pitch(10_000.0);
        assert_eq!(cam.base_pitch, MAX_PITCH);
        cam.apply_mouse_pitch(-10_000.0);
        assert_eq!(cam.base_pitch, -MAX_PITCH);
    }

    #[test]
    fn mouse_is_ignored_in_watch_view() {
        let mut cam = Camera::new(1.0);
        cam.toggle_watch_view();
        cam.apply_mouse_pitch(50.0);
        assert_eq!(cam.base_pitch, 0.0);
    }

    #[test]
    fn bob_lifts_eye_and_tilts_view() {
        let mut cam = Camera::new(1.0);
        cam.bob = 0.05;
        assert!((cam.eye().y - 1.65).abs() < 1e-6);
        assert!((cam.effective_pitch() - 5.0).abs() < 1e-4);
    }
}
