use crate::{Mat4, Vec3};

/// Position plus yaw (`rx`) and pitch (`ry`) in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rx: f32,
    pub ry: f32,
}

impl Pose {
    pub const fn new(x: f32, y: f32, z: f32, rx: f32, ry: f32) -> Self {
        Self { x, y, z, rx, ry }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Unit look direction. Yaw 0 faces -z, pitch -90 degrees faces straight down.
    pub fn sight_vector(&self) -> Vec3 {
        let m = self.ry.cos();
        let yaw = self.rx - 90f32.to_radians();
        Vec3::new(yaw.cos() * m, self.ry.sin(), yaw.sin() * m)
    }

    /// Projection * view for this pose. `ortho > 0` selects an orthographic
    /// projection of that half-height; `radius` is the render radius in chunks.
    pub fn view_projection(&self, width: u32, height: u32, fov: f32, ortho: u32, radius: i32) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        let znear = 0.125;
        let zfar = radius as f32 * 32.0 + 64.0;
        let mut a = Mat4::translation(-self.x, -self.y, -self.z);
        a = Mat4::rotation(Vec3::new(self.rx.cos(), 0.0, self.rx.sin()), self.ry) * a;
        a = Mat4::rotation(Vec3::UP, -self.rx) * a;
        let projection = if ortho > 0 {
            let size = ortho as f32;
            Mat4::ortho(-size * aspect, size * aspect, -size, size, -zfar, zfar)
        } else {
            Mat4::perspective(fov, aspect, znear, zfar)
        };
        projection * a
    }
}
