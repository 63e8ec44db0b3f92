use craft_geom::{Mat4, Vec3};

use crate::face::{Face, FaceMask};
use crate::occlusion::CornerShading;
use crate::tables::{
    CUBE_FLIPPED, CUBE_INDICES, CUBE_NORMALS, CUBE_POSITIONS, CUBE_UVS, PLANT_INDICES,
    PLANT_NORMALS, PLANT_POSITIONS, PLANT_UVS, PLAYER_TILES,
};

/// Position, normal, uv, ao, light.
pub const FLOATS_PER_VERTEX: usize = 10;
pub const VERTICES_PER_FACE: usize = 6;
pub const FLOATS_PER_FACE: usize = FLOATS_PER_VERTEX * VERTICES_PER_FACE;
/// Faces emitted for one plant: two crossed double-sided quads.
pub const PLANT_FACES: usize = 4;

/// Width of one tile in the 16×16 texture atlas.
const TILE: f32 = 0.0625;

#[inline]
fn tile_origin(tile: u16) -> (f32, f32) {
    ((tile % 16) as f32 * TILE, (tile / 16) as f32 * TILE)
}

#[inline]
fn push_vertex(out: &mut Vec<f32>, pos: [f32; 3], normal: [f32; 3], uv: (f32, f32), ao: f32, light: f32) {
    out.extend_from_slice(&[
        pos[0], pos[1], pos[2], normal[0], normal[1], normal[2], uv.0, uv.1, ao, light,
    ]);
}

/// Appends the exposed faces of a cube of half-extent `n` centred at `center`.
/// Each quad is split along the diagonal that keeps AO interpolation smooth.
pub fn make_cube_faces(
    out: &mut Vec<f32>,
    shading: &CornerShading,
    faces: FaceMask,
    tiles: [u16; 6],
    center: Vec3,
    n: f32,
) {
    // inset by half a texel to avoid atlas bleeding
    let a = 1.0 / 2048.0;
    let b = TILE - 1.0 / 2048.0;
    out.reserve(faces.count() * FLOATS_PER_FACE);
    for face in Face::ALL {
        if !faces.has(face) {
            continue;
        }
        let i = face.index();
        let (du, dv) = tile_origin(tiles[i]);
        let ao = &shading.ao[i];
        let flip = ao[0] + ao[3] > ao[1] + ao[2];
        let order = if flip { &CUBE_FLIPPED[i] } else { &CUBE_INDICES[i] };
        for &j in order {
            let p = CUBE_POSITIONS[i][j];
            let [u, v] = CUBE_UVS[i][j];
            push_vertex(
                out,
                [center.x + n * p[0], center.y + n * p[1], center.z + n * p[2]],
                CUBE_NORMALS[i],
                (du + if u { b } else { a }, dv + if v { b } else { a }),
                ao[j],
                shading.light[i][j],
            );
        }
    }
}

/// Block cube with half-extent `n`; `tiles` come from the block's catalog entry.
pub fn make_cube(
    out: &mut Vec<f32>,
    shading: &CornerShading,
    faces: FaceMask,
    center: Vec3,
    n: f32,
    tiles: [u16; 6],
) {
    make_cube_faces(out, shading, faces, tiles, center, n);
}

/// Appends a plant: two crossed quads (four faces), rotated `rotation`
/// degrees about +Y, then moved to `center`.
pub fn make_plant(out: &mut Vec<f32>, ao: f32, light: f32, center: Vec3, n: f32, tile: u16, rotation: f32) {
    let start = out.len();
    let (du, dv) = tile_origin(tile);
    for i in 0..4 {
        for &j in &PLANT_INDICES[i] {
            let p = PLANT_POSITIONS[i][j];
            let [u, v] = PLANT_UVS[i][j];
            push_vertex(
                out,
                [n * p[0], n * p[1], n * p[2]],
                PLANT_NORMALS[i],
                (du + if u { TILE } else { 0.0 }, dv + if v { TILE } else { 0.0 }),
                ao,
                light,
            );
        }
    }
    let count = PLANT_FACES * VERTICES_PER_FACE;
    let data = &mut out[start..];
    let rotate = Mat4::rotation(Vec3::UP, rotation.to_radians());
    rotate.apply(data, count, 3, FLOATS_PER_VERTEX);
    let place = Mat4::translation(center.x, center.y, center.z) * rotate;
    place.apply(data, count, 0, FLOATS_PER_VERTEX);
}

/// Appends the 36-vertex box drawn for a remote player at `(x, y, z)`
/// looking along yaw `rx` and pitch `ry` (radians).
pub fn make_player(out: &mut Vec<f32>, x: f32, y: f32, z: f32, rx: f32, ry: f32) {
    let start = out.len();
    let shading = CornerShading::uniform(0.0, 0.8);
    make_cube_faces(out, &shading, FaceMask::ALL, PLAYER_TILES, Vec3::ZERO, 0.4);
    let count = 6 * VERTICES_PER_FACE;
    let data = &mut out[start..];
    let yaw = Mat4::rotation(Vec3::UP, rx);
    let pitch = Mat4::rotation(Vec3::new(rx.cos(), 0.0, rx.sin()), -ry);
    let rotate = pitch * yaw;
    rotate.apply(data, count, 3, FLOATS_PER_VERTEX);
    let place = Mat4::translation(x, y, z) * rotate;
    place.apply(data, count, 0, FLOATS_PER_VERTEX);
}
