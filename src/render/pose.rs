use glam::{Mat4, Vec3};

use crate::core::Light;

pub const BEZEL_SCALE: Vec3 = Vec3::new(0.35, 0.35, 0.03);
pub const HAND_SCALE: Vec3 = Vec3::new(0.08, 0.4, 0.15);
/// Gap between the bezel's front face and the worn screen, along the face normal.
const SCREEN_LIFT: f32 = 0.005;

/// Model matrices of the watch parts and the position of the screen light,
/// all derived from the eye position each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchPose {
    pub screen: Mat4,
    pub bezel: Mat4,
    pub hand: Mat4,
    pub light: Vec3,
}

impl WatchPose {
    /// `watch_view` holds the watch up in front of the eye; otherwise it is
    /// worn at the side, tilted towards the viewer and bobbing with the run.
    pub fn new(watch_view: bool, eye: Vec3, bob: f32) -> Self {
        if watch_view {
            Self {
                screen: Mat4::from_translation(eye + Vec3::new(0.0, 0.0, -0.48)),
                bezel: Mat4::from_translation(eye + Vec3::new(0.0, 0.0, -0.5))
                    * Mat4::from_scale(BEZEL_SCALE),
                hand: Mat4::from_translation(eye + Vec3::new(0.0, -0.3, -0.6))
                    * Mat4::from_rotation_x((-30.0f32).to_radians())
                    * Mat4::from_scale(HAND_SCALE),
                light: eye + Vec3::new(0.0, 0.0, -0.5),
            }
        } else {
            let tilt = |offset: Vec3| {
                Mat4::from_translation(eye + offset)
                    * Mat4::from_rotation_x((-45.0f32).to_radians())
                    * Mat4::from_rotation_y(30.0f32.to_radians())
            };
            let body = tilt(Vec3::new(0.4, -0.3 + bob, -0.3));
            Self {
                // the tilted offset must stay clear of the bezel cube or it hides the face
                screen: body * Mat4::from_translation(Vec3::Z * (BEZEL_SCALE.z / 2.0 + SCREEN_LIFT)),
                bezel: body * Mat4::from_scale(BEZEL_SCALE),
                hand: tilt(Vec3::new(0.4, -0.4 + bob / 2.0, -0.3)) * Mat4::from_scale(HAND_SCALE),
                light: eye + Vec3::new(0.4, -0.3 + bob, -0.3),
            }
        }
    }

    /// Sun plus the glow of the watch face.
    pub fn lights(&self) -> [Light; 2] {
        [Light::sun(), Light::screen_glow(self.light)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EYE: Vec3 = Vec3::new(0.0, 1.6, 0.0);

    #[test]
    fn watch_view_centres_screen_in_front_of_eye() {
        let pose = WatchPose::new(true, EYE, 0.0);
        let centre = pose.screen.transform_point3(Vec3::ZERO);
        assert!((centre - Vec3::new(0.0, 1.6, -0.48)).length() < 1e-6);
        // screen sits just in front of the bezel face
        let bezel_front = pose.bezel.transform_point3(Vec3::new(0.0, 0.0, 0.5));
        assert!(bezel_front.z < centre.z);
    }

    #[test]
    fn worn_pose_follows_bob() {
        let rest = WatchPose::new(false, EYE, 0.0);
        let up = WatchPose::new(false, EYE, 0.05);
        let d_screen = up.screen.transform_point3(Vec3::ZERO) - rest.screen.transform_point3(Vec3::ZERO);
        let d_hand = up.hand.transform_point3(Vec3::ZERO) - rest.hand.transform_point3(Vec3::ZERO);
        assert!((d_screen.y - 0.05).abs() < 1e-6);
        assert!((d_hand.y - 0.025).abs() < 1e-6);
        assert!((up.light.y - rest.light.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn worn_screen_faces_up_and_back() {
        let pose = WatchPose::new(false, EYE, 0.0);
        let normal = pose.screen.transform_vector3(Vec3::Z).normalize();
        assert!(normal.y > 0.0);
        assert!(normal.z > 0.0);
    }

    #[test]
    fn worn_screen_sits_above_the_bezel_face() {
        for bob in [-0.05, 0.0, 0.05] {
            let pose = WatchPose::new(false, EYE, bob);
            let normal = pose.bezel.transform_vector3(Vec3::Z).normalize();
            let centre = pose.screen.transform_point3(Vec3::ZERO);
            let bezel_front = pose.bezel.transform_point3(Vec3::new(0.0, 0.0, 0.5));
            let lift = (centre - bezel_front).dot(normal);
            assert!(lift > 0.0, "screen {lift} behind the bezel at bob {bob}");
            // screen corners stay within the bezel's outline
            let corner = pose.screen.transform_point3(Vec3::new(0.15, 0.15, 0.0));
            let local = pose.bezel.inverse().transform_point3(corner);
            assert!(local.x.abs() <= 0.5 && local.y.abs() <= 0.5);
        }
    }
}
