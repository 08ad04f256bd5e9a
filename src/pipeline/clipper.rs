use glam::{Vec2, Vec3, Vec4};

/// Clip-space planes of the OpenGL-style canonical volume, `-w <= x,y,z <= w`.
/// A vertex is inside a plane when `dot(plane, position) >= 0`.
pub const CLIP_SPACE_PLANES: [Vec4; 6] = [
    Vec4::new(1.0, 0.0, 0.0, 1.0),  // left
    Vec4::new(-1.0, 0.0, 0.0, 1.0), // right
    Vec4::new(0.0, 1.0, 0.0, 1.0),  // bottom
    Vec4::new(0.0, -1.0, 0.0, 1.0), // top
    Vec4::new(0.0, 0.0, 1.0, 1.0),  // near
    Vec4::new(0.0, 0.0, -1.0, 1.0), // far
];

#[derive(Clone, Debug)]
pub struct ClipVertex {
    pub position: Vec4,
    pub world_pos: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl ClipVertex {
    pub fn lerp(&self, other: &ClipVertex, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            world_pos: self.world_pos.lerp(other.world_pos, t),
            normal: self.normal.lerp(other.normal, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClipTriangle {
    pub vertices: [ClipVertex; 3],
}

pub struct Clipper {
    backface_culling: bool,
    frustum_planes: [Vec4; 6],
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipper {
    pub fn new() -> Self {
        Self {
            backface_culling: true,
            frustum_planes: CLIP_SPACE_PLANES,
        }
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    /// Clips against every frustum plane, then drops degenerate and (when
    /// enabled) back-facing pieces. Culling runs after clipping so every
    /// surviving vertex has `w > 0`.
    pub fn clip_triangle(&self, triangle: &ClipTriangle) -> Vec<ClipTriangle> {
        if self.is_degenerate(triangle) {
            return Vec::new();
        }

        let mut triangles = vec![triangle.clone()];
        for plane in &self.frustum_planes {
            triangles = self.clip_against_plane(triangles, *plane);
            if triangles.is_empty() {
                break;
            }
        }

        triangles.retain(|tri| !self.backface_culling || self.is_front_facing(tri));
        triangles
    }

    fn is_degenerate(&self, triangle: &ClipTriangle) -> bool {
        let epsilon = 1e-12;
        (0..3).any(|i| {
            let j = (i + 1) % 3;
            let diff = triangle.vertices[i].position - triangle.vertices[j].position;
            diff.length_squared() < epsilon
        })
    }

    /// CCW in NDC (x right, y up) is front.
    fn is_front_facing(&self, tri: &ClipTriangle) -> bool {
        let [v0, v1, v2] = tri.vertices.each_ref().map(|v| {
            let p = v.position;
            Vec3::new(p.x / p.w, p.y / p.w, p.z / p.w)
        });
        (v1 - v0).cross(v2 - v0).z > 0.0
    }

    fn clip_against_plane(&self, triangles: Vec<ClipTriangle>, plane: Vec4) -> Vec<ClipTriangle> {
        let mut result = Vec::with_capacity(triangles.len());

        for triangle in triangles {
            let distances = triangle
                .vertices
                .each_ref()
                .map(|v| plane.dot(v.position));
            let inside_count = distances.iter().filter(|&&d| d >= 0.0).count();

            match inside_count {
                0 => continue,
                3 => result.push(triangle),
                _ => result.extend(self.clip_triangle_against_plane(triangle, distances)),
            }
        }

        result
    }

    /// Sutherland-Hodgman on a single triangle; the resulting convex polygon
    /// is fanned back into triangles from its first vertex.
    fn clip_triangle_against_plane(
        &self,
        triangle: ClipTriangle,
        distances: [f32; 3],
    ) -> Vec<ClipTriangle> {
        let mut new_verts = Vec::with_capacity(4);
        for i in 0..3 {
            let j = (i + 1) % 3;

            let v0 = &triangle.vertices[i];
            let v1 = &triangle.vertices[j];
            let d0 = distances[i];
            let d1 = distances[j];

            if d0 >= 0.0 {
                new_verts.push(v0.clone());
            }

            if (d0 < 0.0) != (d1 < 0.0) {
                let t = d0 / (d0 - d1);
                new_verts.push(v0.lerp(v1, t));
            }
        }

        (1..new_verts.len().saturating_sub(1))
            .map(|i| ClipTriangle {
                vertices: [
                    new_verts[0].clone(),
                    new_verts[i].clone(),
                    new_verts[i + 1].clone(),
                ],
            })
            .collect()
    }
}
