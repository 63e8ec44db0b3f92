use crate::{Aabb, Mat4};

/// Clip planes extracted from a view-projection matrix. Planes are
/// left, right, bottom, top, near, far; orthographic views only test the
/// first four.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub planes: [[f32; 4]; 6],
    pub ortho: bool,
}

impl Frustum {
    pub fn from_matrix(m: &Mat4, radius: i32, ortho: bool) -> Frustum {
        let znear = 0.125;
        let zfar = radius as f32 * 32.0 + 64.0;
        let row = |r: usize| [m.col_row(0, r), m.col_row(1, r), m.col_row(2, r), m.col_row(3, r)];
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));
        let mut planes = [[0.0; 4]; 6];
        for i in 0..4 {
            planes[0][i] = r3[i] + r0[i];
            planes[1][i] = r3[i] - r0[i];
            planes[2][i] = r3[i] + r1[i];
            planes[3][i] = r3[i] - r1[i];
            planes[4][i] = znear * r3[i] + r2[i];
            planes[5][i] = zfar * r3[i] - r2[i];
        }
        Frustum { planes, ortho }
    }

    /// A box is rejected only when all eight corners lie behind a single plane.
    pub fn aabb_visible(&self, bounds: &Aabb) -> bool {
        let corners = bounds.corners();
        let n = if self.ortho { 4 } else { 6 };
        for plane in &self.planes[..n] {
            let mut inside = 0;
            let mut outside = 0;
            for c in &corners {
                let d = plane[0] * c.x + plane[1] * c.y + plane[2] * c.z + plane[3];
                if d < 0.0 {
                    outside += 1;
                } else {
                    inside += 1;
                }
                if inside > 0 && outside > 0 {
                    break;
                }
            }
            if inside == 0 {
                return false;
            }
        }
        true
    }
}
