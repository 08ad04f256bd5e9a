use crate::pipeline::{ClipTriangle, ClipVertex, Fragment};
use glam::{UVec2, Vec2, Vec3};
use rayon::prelude::*;

pub struct Rasterizer {
    width: usize,
    height: usize,
}

/// A clipped vertex after the perspective divide and viewport transform.
#[derive(Clone, Copy)]
struct ScreenVertex {
    pos: Vec2,
    depth: f32,
    inv_w: f32,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Modifies the fragment buffer in place. Triangle order is preserved so
    /// blending stays deterministic.
    pub fn rasterize(&self, triangles: &[ClipTriangle], frags: &mut Vec<Fragment>) {
        frags.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        frags.par_extend(
            triangles
                .par_iter()
                .flat_map(|tri| self.rasterize_triangle_barycentric(tri)),
        );
        log::trace!(
            "Rasterized {} triangles into {} fragments",
            triangles.len(),
            frags.len()
        );
    }

    fn project_to_screen(&self, v: &ClipVertex) -> ScreenVertex {
        let inv_w = 1.0 / v.position.w;
        let ndc = v.position.truncate() * inv_w;
        ScreenVertex {
            pos: Vec2::new(
                (ndc.x + 1.0) * 0.5 * self.width as f32,
                (1.0 - ndc.y) * 0.5 * self.height as f32,
            ),
            depth: ndc.z * 0.5 + 0.5,
            inv_w,
        }
    }

    fn rasterize_triangle_barycentric(&self, tri: &ClipTriangle) -> Vec<Fragment> {
        let mut verts = [&tri.vertices[0], &tri.vertices[1], &tri.vertices[2]];
        let mut screen = verts.map(|v| self.project_to_screen(v));

        let mut area = edge_function(screen[0].pos, screen[1].pos, screen[2].pos);
        if area.abs() < f32::EPSILON {
            return Vec::new();
        }
        // Normalise to one orientation so the fill rule below has one meaning.
        if area < 0.0 {
            verts.swap(1, 2);
            screen.swap(1, 2);
            area = -area;
        }

        let min = screen
            .iter()
            .fold(Vec2::splat(f32::MAX), |acc, v| acc.min(v.pos));
        let max = screen
            .iter()
            .fold(Vec2::splat(f32::MIN), |acc, v| acc.max(v.pos));

        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.width - 1);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return Vec::new();
        }

        let [s0, s1, s2] = screen;
        let edges = [(s1.pos, s2.pos), (s2.pos, s0.pos), (s0.pos, s1.pos)];
        let owns_edge = edges.map(|(a, b)| is_top_left(a, b));

        let mut fragments = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let mut w = [0.0f32; 3];
                let mut inside = true;
                for (i, (a, b)) in edges.iter().enumerate() {
                    let e = edge_function(*a, *b, p);
                    if e < 0.0 || (e == 0.0 && !owns_edge[i]) {
                        inside = false;
                        break;
                    }
                    w[i] = e / area;
                }
                if !inside {
                    continue;
                }

                let depth = w[0] * s0.depth + w[1] * s1.depth + w[2] * s2.depth;

                // perspective-correct weights
                let pw = [w[0] * s0.inv_w, w[1] * s1.inv_w, w[2] * s2.inv_w];
                let sum = pw[0] + pw[1] + pw[2];
                if sum <= 0.0 {
                    continue;
                }
                let pw = pw.map(|k| k / sum);

                fragments.push(Fragment {
                    screen_pos: UVec2::new(x as u32, y as u32),
                    depth,
                    world_pos: interpolate3(pw, verts.map(|v| v.world_pos)),
                    normal: interpolate3(pw, verts.map(|v| v.normal)),
                    uv: verts[0].uv * pw[0] + verts[1].uv * pw[1] + verts[2].uv * pw[2],
                });
            }
        }

        fragments
    }
}

fn interpolate3(w: [f32; 3], v: [Vec3; 3]) -> Vec3 {
    v[0] * w[0] + v[1] * w[1] + v[2] * w[2]
}

/// Twice the signed area of `(a, b, p)` in y-down screen space. Evaluated with
/// the endpoints in a canonical order so a shared edge yields exactly opposite
/// values for the two triangles using it.
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let raw = |a: Vec2, b: Vec2| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if (a.x, a.y) > (b.x, b.y) {
        -raw(b, a)
    } else {
        raw(a, b)
    }
}

/// Top-left fill rule: pixels exactly on an edge belong to the triangle only
/// when that edge is a top or left edge.
fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    (d.y == 0.0 && d.x > 0.0) || d.y < 0.0
}
