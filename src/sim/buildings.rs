use glam::{Mat4, Vec3};
use rand::Rng;

use crate::core::geometry::GROUND_SEGMENT_LENGTH;
use crate::core::Color;

pub const BUILDINGS_PER_SIDE: usize = 6;
pub const BUILDING_SPACING: f32 = 15.0;
pub const ROAD_WIDTH: f32 = 8.0;
pub const NUM_GROUND_SEGMENTS: usize = 5;

/// Extent of the scrolled world along -Z.
pub const WORLD_DEPTH: f32 = NUM_GROUND_SEGMENTS as f32 * GROUND_SEGMENT_LENGTH;
/// Buildings scrolled past this z (behind the camera) wrap to the far end.
pub const WRAP_NEAR_Z: f32 = 10.0;

/// Ground gap between the road edge and the building row.
const KERB: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    /// Footprint centre; `y` is always 0.
    pub position: Vec3,
    /// Width, height and depth.
    pub scale: Vec3,
    pub color: Color,
}

impl Building {
    /// Model matrix for the unit cube, standing on the ground at the wrapped
    /// scroll position.
    pub fn model_matrix(&self, ground_offset: f32) -> Mat4 {
        let z = wrapped_z(self.position.z, ground_offset);
        Mat4::from_translation(Vec3::new(self.position.x, self.scale.y / 2.0, z))
            * Mat4::from_scale(self.scale)
    }
}

/// Two rows of buildings flanking the road, one per side every
/// [`BUILDING_SPACING`] units, each slightly jittered.
pub fn generate_buildings(rng: &mut impl Rng) -> Vec<Building> {
    let mut buildings = Vec::with_capacity(BUILDINGS_PER_SIDE * 2);
    for i in 0..BUILDINGS_PER_SIDE {
        for side in [-1.0f32, 1.0] {
            let side_x = side * (ROAD_WIDTH + KERB);
            let jitter_x = (rng.gen_range(0..10) - 5) as f32 * 0.5;
            let jitter_z = rng.gen_range(0..10) as f32 * 0.5;

            let scale = Vec3::new(
                4.0 + rng.gen_range(0..40) as f32 * 0.1,
                6.0 + rng.gen_range(0..100) as f32 * 0.1,
                4.0 + rng.gen_range(0..40) as f32 * 0.1,
            );
            let color = Color::new(
                0.5 + rng.gen_range(0..30) as f32 * 0.01,
                0.45 + rng.gen_range(0..30) as f32 * 0.01,
                0.4 + rng.gen_range(0..30) as f32 * 0.01,
            );

            buildings.push(Building {
                position: Vec3::new(
                    side_x + jitter_x,
                    0.0,
                    -10.0 - i as f32 * BUILDING_SPACING - jitter_z,
                ),
                scale,
                color,
            });
        }
    }
    log::debug!("Generated {} buildings", buildings.len());
    buildings
}

/// Scrolls `z` by `offset` and wraps the result into
/// `[-WORLD_DEPTH, WRAP_NEAR_Z]` in steps of [`WORLD_DEPTH`].
pub fn wrapped_z(z: f32, offset: f32) -> f32 {
    let mut z = z + offset;
    if !z.is_finite() {
        return z;
    }
    if z > WRAP_NEAR_Z {
        z -= WORLD_DEPTH * ((z - WRAP_NEAR_Z) / WORLD_DEPTH).ceil();
    }
    if z < -WORLD_DEPTH {
        z += WORLD_DEPTH * ((-WORLD_DEPTH - z) / WORLD_DEPTH).ceil();
    }
    z
}
