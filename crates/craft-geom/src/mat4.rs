use core::ops::Mul;

use crate::Vec3;

/// 4x4 matrix stored column-major (`m[col * 4 + row]`), matching the layout
/// renderers expect for uniform upload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn translation(dx: f32, dy: f32, dz: f32) -> Mat4 {
        let mut m = Self::IDENTITY;
        m.0[12] = dx;
        m.0[13] = dy;
        m.0[14] = dz;
        m
    }

    /// Rotation of `angle` radians about `axis` (normalised here).
    pub fn rotation(axis: Vec3, angle: f32) -> Mat4 {
        let Vec3 { x, y, z } = axis.normalized();
        let s = angle.sin();
        let c = angle.cos();
        let m = 1.0 - c;
        Mat4([
            m * x * x + c,
            m * x * y - z * s,
            m * z * x + y * s,
            0.0,
            m * x * y + z * s,
            m * y * y + c,
            m * y * z - x * s,
            0.0,
            m * z * x - y * s,
            m * y * z + x * s,
            m * z * z + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, znear: f32, zfar: f32) -> Mat4 {
        let t = 2.0 * znear;
        let w = right - left;
        let h = top - bottom;
        let d = zfar - znear;
        let mut m = [0.0; 16];
        m[0] = t / w;
        m[5] = t / h;
        m[8] = (right + left) / w;
        m[9] = (top + bottom) / h;
        m[10] = (-zfar - znear) / d;
        m[11] = -1.0;
        m[14] = (-t * zfar) / d;
        Mat4(m)
    }

    /// `fov` is the vertical field of view in degrees.
    pub fn perspective(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
        let ymax = znear * (fov * core::f32::consts::PI / 360.0).tan();
        let xmax = ymax * aspect;
        Self::frustum(-xmax, xmax, -ymax, ymax, znear, zfar)
    }

    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let mut m = [0.0; 16];
        m[0] = 2.0 / (right - left);
        m[5] = 2.0 / (top - bottom);
        m[10] = -2.0 / (far - near);
        m[12] = -(right + left) / (right - left);
        m[13] = -(top + bottom) / (top - bottom);
        m[14] = -(far + near) / (far - near);
        m[15] = 1.0;
        Mat4(m)
    }

    #[inline]
    pub fn col_row(&self, col: usize, row: usize) -> f32 {
        self.0[col * 4 + row]
    }

    /// Transforms a point (`w = 1`).
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let m = &self.0;
        Vec3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12],
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13],
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14],
        )
    }

    /// Transforms `count` xyz triples in an interleaved vertex buffer in place.
    pub fn apply(&self, data: &mut [f32], count: usize, offset: usize, stride: usize) {
        for i in 0..count {
            let base = offset + stride * i;
            let v = self.transform_point(Vec3::new(data[base], data[base + 1], data[base + 2]));
            data[base] = v.x;
            data[base + 1] = v.y;
            data[base + 2] = v.z;
        }
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for c in 0..4 {
            for r in 0..4 {
                out[c * 4 + r] = (0..4).map(|i| self.0[i * 4 + r] * rhs.0[c * 4 + i]).sum();
            }
        }
        Mat4(out)
    }
}
