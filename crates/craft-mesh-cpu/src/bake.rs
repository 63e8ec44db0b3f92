use craft_blocks::BlockRegistry;
use craft_chunk::Neighborhood;
use craft_geom::Vec3;
use craft_lighting::LightVolume;
use craft_world::Simplex;

use crate::emit::{FLOATS_PER_FACE, PLANT_FACES, make_cube, make_plant};
use crate::face::{Face, FaceMask};
use crate::occlusion::occlusion;

/// Vertex data for one chunk: `faces` quads of six 10-float vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub data: Vec<f32>,
    pub faces: usize,
    /// Lowest and highest y of any block that produced geometry. An empty
    /// mesh keeps the starting values 256 and 0.
    pub miny: i32,
    pub maxy: i32,
}

impl Default for ChunkMesh {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            faces: 0,
            miny: 256,
            maxy: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BakeOptions {
    /// Run the light flood fill; when off every face is unlit.
    pub show_lights: bool,
    /// Seed of the noise that picks each plant's rotation.
    pub plant_seed: i32,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            show_lights: true,
            plant_seed: 0,
        }
    }
}

/// Half-extent of a block.
const BLOCK_HALF: f32 = 0.5;

/// Faces of the block at local `(x, y, z)` that border a non-opaque cell.
/// The bottom face is never emitted at world y = 0.
fn exposed_faces(volume: &LightVolume, x: i32, y: i32, z: i32, world_y: i32) -> FaceMask {
    let mut mask = FaceMask::NONE;
    for face in Face::ALL {
        let (dx, dy, dz) = face.delta();
        mask.0[face.index()] = !volume.opaque_at(x + dx, y + dy, z + dz);
    }
    if world_y <= 0 {
        mask.0[Face::Bottom.index()] = false;
    }
    mask
}

/// Opacity, light and sky shade of the 27 cells around `(x, y, z)`.
fn sample_neighborhood(volume: &LightVolume, x: i32, y: i32, z: i32) -> ([bool; 27], [u8; 27], [f32; 27]) {
    let mut neighbors = [false; 27];
    let mut lights = [0u8; 27];
    let mut shades = [0f32; 27];
    let mut index = 0;
    for dx in -1..=1 {
        for dy in -1..=1 {
            for dz in -1..=1 {
                let (cx, cy, cz) = (x + dx, y + dy, z + dz);
                neighbors[index] = volume.opaque_at(cx, cy, cz);
                lights[index] = volume.light_at(cx, cy, cz);
                if cy <= volume.highest_at(cx, cz) {
                    // nearest opaque cell in the 8 above darkens the corner
                    if let Some(oy) = (0..8).find(|&oy| volume.opaque_at(cx, cy + oy, cz)) {
                        shades[index] = 1.0 - oy as f32 * 0.125;
                    }
                }
                index += 1;
            }
        }
    }
    (neighbors, lights, shades)
}

/// Turns the centre chunk of `n` into vertex data. Pure in its inputs: the
/// neighbourhood is only read.
pub fn bake_chunk(n: &Neighborhood<'_>, reg: &BlockRegistry, opts: &BakeOptions) -> ChunkMesh {
    let mut mesh = ChunkMesh::default();
    let Some(map) = n.center_blocks() else {
        return mesh;
    };
    let volume = LightVolume::build(n, reg, opts.show_lights);

    let mut exposed = Vec::new();
    for (ex, ey, ez, ew) in map.iter() {
        if ew <= 0 {
            continue;
        }
        let (x, y, z) = volume.local(ex, ey, ez);
        let mask = exposed_faces(&volume, x, y, z, ey);
        let total = mask.count();
        if total == 0 {
            continue;
        }
        mesh.miny = mesh.miny.min(ey);
        mesh.maxy = mesh.maxy.max(ey);
        mesh.faces += if reg.is_plant(ew) { PLANT_FACES } else { total };
        exposed.push((ex, ey, ez, ew, mask));
    }

    let simplex = Simplex::new(opts.plant_seed);
    mesh.data.reserve(mesh.faces * FLOATS_PER_FACE);
    for (ex, ey, ez, ew, mask) in exposed {
        let (x, y, z) = volume.local(ex, ey, ez);
        let (neighbors, lights, shades) = sample_neighborhood(&volume, x, y, z);
        let shading = occlusion(&neighbors, &lights, &shades);
        let center = Vec3::new(ex as f32, ey as f32, ez as f32);
        if reg.is_plant(ew) {
            let rotation = simplex.simplex2(ex as f32, ez as f32, 4, 0.5, 2.0) * 360.0;
            make_plant(
                &mut mesh.data,
                shading.min_ao(),
                shading.max_light(),
                center,
                BLOCK_HALF,
                reg.plant_tile(ew),
                rotation,
            );
        } else {
            make_cube(&mut mesh.data, &shading, mask, center, BLOCK_HALF, reg.tiles(ew));
        }
    }
    log::trace!(
        target: "mesh",
        "baked ({}, {}): {} faces, y {}..{}",
        n.center.p,
        n.center.q,
        mesh.faces,
        mesh.miny,
        mesh.maxy
    );
    mesh
}
