use craft_geom::{Aabb, Frustum, Pose, Vec3};
use proptest::prelude::*;

fn frustum_for(pose: Pose, ortho: u32) -> Frustum {
    let m = pose.view_projection(1024, 768, 65.0, ortho, 10);
    Frustum::from_matrix(&m, 10, ortho > 0)
}

#[test]
fn box_in_front_is_visible() {
    let f = frustum_for(Pose::default(), 0);
    let b = Aabb::new(Vec3::new(-1.0, -1.0, -10.0), Vec3::new(1.0, 1.0, -5.0));
    assert!(f.aabb_visible(&b));
}

#[test]
fn box_behind_is_culled() {
    let f = frustum_for(Pose::default(), 0);
    let b = Aabb::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 10.0));
    assert!(!f.aabb_visible(&b));
}

#[test]
fn box_beyond_far_plane_is_culled() {
    // far plane sits at radius * 32 + 64 = 384
    let f = frustum_for(Pose::default(), 0);
    let b = Aabb::new(Vec3::new(-1.0, -1.0, -600.0), Vec3::new(1.0, 1.0, -500.0));
    assert!(!f.aabb_visible(&b));
}

#[test]
fn ortho_ignores_depth_planes() {
    let f = frustum_for(Pose::default(), 8);
    assert!(f.ortho);
    let behind = Aabb::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 10.0));
    assert!(f.aabb_visible(&behind));
}

proptest! {
    // A box enclosing the camera always straddles every plane
    #[test]
    fn box_around_camera_is_visible(x in -500.0f32..500.0, z in -500.0f32..500.0, rx in 0.0f32..6.28, ry in -1.5f32..1.5) {
        let pose = Pose::new(x, 40.0, z, rx, ry);
        let f = frustum_for(pose, 0);
        let b = Aabb::new(Vec3::new(x - 33.0, 0.0, z - 33.0), Vec3::new(x + 33.0, 256.0, z + 33.0));
        prop_assert!(f.aabb_visible(&b));
    }

    #[test]
    fn sight_vector_is_unit(rx in -10.0f32..10.0, ry in -1.57f32..1.57) {
        let v = Pose::new(0.0, 0.0, 0.0, rx, ry).sight_vector();
        prop_assert!((v.length() - 1.0).abs() < 1e-4);
    }
}
