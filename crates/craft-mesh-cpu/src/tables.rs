//! Fixed geometry and occlusion tables. Indices into the 27-cell
//! neighbourhood are `(dx + 1) * 9 + (dy + 1) * 3 + (dz + 1)`.

/// Corner and the two edge cells sampled for each face corner.
pub(crate) const LOOKUP3: [[[usize; 3]; 4]; 6] = [
    [[0, 1, 3], [2, 1, 5], [6, 3, 7], [8, 5, 7]],
    [[18, 19, 21], [20, 19, 23], [24, 21, 25], [26, 23, 25]],
    [[6, 7, 15], [8, 7, 17], [24, 15, 25], [26, 17, 25]],
    [[0, 1, 9], [2, 1, 11], [18, 9, 19], [20, 11, 19]],
    [[0, 3, 9], [6, 3, 15], [18, 9, 21], [24, 15, 21]],
    [[2, 5, 11], [8, 5, 17], [20, 11, 23], [26, 17, 23]],
];

/// The 2×2×2 cell block averaged for each face corner's shade and light.
pub(crate) const LOOKUP4: [[[usize; 4]; 4]; 6] = [
    [[0, 1, 3, 4], [1, 2, 4, 5], [3, 4, 6, 7], [4, 5, 7, 8]],
    [[18, 19, 21, 22], [19, 20, 22, 23], [21, 22, 24, 25], [22, 23, 25, 26]],
    [[6, 7, 15, 16], [7, 8, 16, 17], [15, 16, 24, 25], [16, 17, 25, 26]],
    [[0, 1, 9, 10], [1, 2, 10, 11], [9, 10, 18, 19], [10, 11, 19, 20]],
    [[0, 3, 9, 12], [3, 6, 12, 15], [9, 12, 18, 21], [12, 15, 21, 24]],
    [[2, 5, 11, 14], [5, 8, 14, 17], [11, 14, 20, 23], [14, 17, 23, 26]],
];

pub(crate) const CURVE: [f32; 4] = [0.0, 0.25, 0.5, 0.75];

pub(crate) const CUBE_POSITIONS: [[[f32; 3]; 4]; 6] = [
    [[-1., -1., -1.], [-1., -1., 1.], [-1., 1., -1.], [-1., 1., 1.]],
    [[1., -1., -1.], [1., -1., 1.], [1., 1., -1.], [1., 1., 1.]],
    [[-1., 1., -1.], [-1., 1., 1.], [1., 1., -1.], [1., 1., 1.]],
    [[-1., -1., -1.], [-1., -1., 1.], [1., -1., -1.], [1., -1., 1.]],
    [[-1., -1., -1.], [-1., 1., -1.], [1., -1., -1.], [1., 1., -1.]],
    [[-1., -1., 1.], [-1., 1., 1.], [1., -1., 1.], [1., 1., 1.]],
];

pub(crate) const CUBE_NORMALS: [[f32; 3]; 6] = [
    [-1., 0., 0.],
    [1., 0., 0.],
    [0., 1., 0.],
    [0., -1., 0.],
    [0., 0., -1.],
    [0., 0., 1.],
];

pub(crate) const CUBE_UVS: [[[bool; 2]; 4]; 6] = [
    [[false, false], [true, false], [false, true], [true, true]],
    [[true, false], [false, false], [true, true], [false, true]],
    [[false, true], [false, false], [true, true], [true, false]],
    [[false, false], [false, true], [true, false], [true, true]],
    [[false, false], [false, true], [true, false], [true, true]],
    [[true, false], [true, true], [false, false], [false, true]],
];

pub(crate) const CUBE_INDICES: [[usize; 6]; 6] = [
    [0, 3, 2, 0, 1, 3],
    [0, 3, 1, 0, 2, 3],
    [0, 3, 2, 0, 1, 3],
    [0, 3, 1, 0, 2, 3],
    [0, 3, 2, 0, 1, 3],
    [0, 3, 1, 0, 2, 3],
];

/// Same quads split along the other diagonal.
pub(crate) const CUBE_FLIPPED: [[usize; 6]; 6] = [
    [0, 1, 2, 1, 3, 2],
    [0, 2, 1, 2, 3, 1],
    [0, 1, 2, 1, 3, 2],
    [0, 2, 1, 2, 3, 1],
    [0, 1, 2, 1, 3, 2],
    [0, 2, 1, 2, 3, 1],
];

pub(crate) const PLANT_POSITIONS: [[[f32; 3]; 4]; 4] = [
    [[0., -1., -1.], [0., -1., 1.], [0., 1., -1.], [0., 1., 1.]],
    [[0., -1., -1.], [0., -1., 1.], [0., 1., -1.], [0., 1., 1.]],
    [[-1., -1., 0.], [-1., 1., 0.], [1., -1., 0.], [1., 1., 0.]],
    [[-1., -1., 0.], [-1., 1., 0.], [1., -1., 0.], [1., 1., 0.]],
];

pub(crate) const PLANT_NORMALS: [[f32; 3]; 4] = [
    [-1., 0., 0.],
    [1., 0., 0.],
    [0., 0., -1.],
    [0., 0., 1.],
];

pub(crate) const PLANT_UVS: [[[bool; 2]; 4]; 4] = [
    [[false, false], [true, false], [false, true], [true, true]],
    [[true, false], [false, false], [true, true], [false, true]],
    [[false, false], [false, true], [true, false], [true, true]],
    [[true, false], [true, true], [false, false], [false, true]],
];

pub(crate) const PLANT_INDICES: [[usize; 6]; 4] = [
    [0, 3, 2, 0, 1, 3],
    [0, 3, 1, 0, 2, 3],
    [0, 3, 2, 0, 1, 3],
    [0, 3, 1, 0, 2, 3],
];

/// Player skin tiles in `Face` order.
pub(crate) const PLAYER_TILES: [u16; 6] = [226, 224, 241, 209, 225, 227];
