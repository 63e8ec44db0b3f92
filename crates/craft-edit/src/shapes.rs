use craft_blocks::types::{LEAVES, WOOD};

use crate::{BlockEditor, BlockMark, Selection};

const CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, 0.5, 0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, -0.5],
    [0.5, 0.5, 0.5],
];

/// Box spanned by two marks of the same type. A hollow box keeps only the
/// cells on its outer shell; degenerate axes don't count as shell.
pub fn cube(ed: &mut dyn BlockEditor, b1: &BlockMark, b2: &BlockMark, fill: bool) {
    if b1.w != b2.w {
        return;
    }
    let w = b1.w;
    let (x1, x2) = (b1.x.min(b2.x), b1.x.max(b2.x));
    let (y1, y2) = (b1.y.min(b2.y), b1.y.max(b2.y));
    let (z1, z2) = (b1.z.min(b2.z), b1.z.max(b2.z));
    let flat = i32::from(x1 == x2) + i32::from(y1 == y2) + i32::from(z1 == z2);
    log::debug!(target: "edit", "cube ({x1},{y1},{z1})..({x2},{y2},{z2}) w={w} fill={fill}");
    for x in x1..=x2 {
        for y in y1..=y2 {
            for z in z1..=z2 {
                if !fill {
                    let shell = i32::from(x == x1 || x == x2)
                        + i32::from(y == y1 || y == y2)
                        + i32::from(z == z1 || z == z2);
                    if shell <= flat {
                        continue;
                    }
                }
                ed.builder_block(x, y, z, w);
            }
        }
    }
}

/// Cells whose unit cube straddles the sphere surface (or lies inside it
/// when `fill`). `fx`/`fy`/`fz` restrict the shape to the plane through the
/// centre perpendicular to that axis.
pub fn sphere(ed: &mut dyn BlockEditor, center: &BlockMark, radius: i32, fill: bool, fx: bool, fy: bool, fz: bool) {
    let BlockMark { x: cx, y: cy, z: cz, w } = *center;
    let r = radius as f32;
    for x in cx - radius..=cx + radius {
        if fx && x != cx {
            continue;
        }
        for y in cy - radius..=cy + radius {
            if fy && y != cy {
                continue;
            }
            for z in cz - radius..=cz + radius {
                if fz && z != cz {
                    continue;
                }
                let mut inside = false;
                let mut outside = fill;
                for [ox, oy, oz] in CORNERS {
                    let dx = (x - cx) as f32 + ox;
                    let dy = (y - cy) as f32 + oy;
                    let dz = (z - cz) as f32 + oz;
                    if (dx * dx + dy * dy + dz * dz).sqrt() < r {
                        inside = true;
                    } else {
                        outside = true;
                    }
                }
                if inside && outside {
                    ed.builder_block(x, y, z, w);
                }
            }
        }
    }
}

/// A stack of circles along the one axis on which the two marks differ.
pub fn cylinder(ed: &mut dyn BlockEditor, b1: &BlockMark, b2: &BlockMark, radius: i32, fill: bool) {
    if b1.w != b2.w {
        return;
    }
    let (x1, x2) = (b1.x.min(b2.x), b1.x.max(b2.x));
    let (y1, y2) = (b1.y.min(b2.y), b1.y.max(b2.y));
    let (z1, z2) = (b1.z.min(b2.z), b1.z.max(b2.z));
    let (fx, fy, fz) = (x1 != x2, y1 != y2, z1 != z2);
    if u8::from(fx) + u8::from(fy) + u8::from(fz) != 1 {
        return;
    }
    let mut slice = BlockMark::new(x1, y1, z1, b1.w);
    if fx {
        for x in x1..=x2 {
            slice.x = x;
            sphere(ed, &slice, radius, fill, true, false, false);
        }
    }
    if fy {
        for y in y1..=y2 {
            slice.y = y;
            sphere(ed, &slice, radius, fill, false, true, false);
        }
    }
    if fz {
        for z in z1..=z2 {
            slice.z = z;
            sphere(ed, &slice, radius, fill, false, false, true);
        }
    }
}

/// Repeats the block at `b1` with the stride `b2 - b1`. An axis with zero
/// stride is placed once whatever its count.
pub fn array(ed: &mut dyn BlockEditor, b1: &BlockMark, b2: &BlockMark, xc: i32, yc: i32, zc: i32) {
    if b1.w != b2.w {
        return;
    }
    let (dx, dy, dz) = (b2.x - b1.x, b2.y - b1.y, b2.z - b1.z);
    let xc = if dx != 0 { xc } else { 1 };
    let yc = if dy != 0 { yc } else { 1 };
    let zc = if dz != 0 { zc } else { 1 };
    for i in 0..xc {
        let x = b1.x + dx * i;
        for j in 0..yc {
            let y = b1.y + dy * j;
            for k in 0..zc {
                ed.builder_block(x, y, b1.z + dz * k, b1.w);
            }
        }
    }
}

/// Leaf ball with a seven block trunk rooted at `block`.
pub fn tree(ed: &mut dyn BlockEditor, block: &BlockMark) {
    let BlockMark { x: bx, y: by, z: bz, .. } = *block;
    for y in by + 3..by + 8 {
        for dx in -3..=3 {
            for dz in -3..=3 {
                let dy = y - (by + 4);
                if dx * dx + dy * dy + dz * dz < 11 {
                    ed.builder_block(bx + dx, y, bz + dz, i32::from(LEAVES));
                }
            }
        }
    }
    for y in by..by + 7 {
        ed.builder_block(bx, y, bz, i32::from(WOOD));
    }
}

/// Replays the full-height columns between the copied marks at the current
/// marks, mirrored to follow the direction of each pair and shifted by the
/// height difference between `copy1` and `block1`.
pub fn paste(ed: &mut dyn BlockEditor, sel: &Selection) {
    let (c1, c2) = (sel.copy1, sel.copy0);
    let (p1, p2) = (sel.block1, sel.block0);
    let scx = (c2.x - c1.x).signum();
    let scz = (c2.z - c1.z).signum();
    let spx = (p2.x - p1.x).signum();
    let spz = (p2.z - p1.z).signum();
    let oy = p1.y - c1.y;
    let dx = (c2.x - c1.x).abs();
    let dz = (c2.z - c1.z).abs();
    log::debug!(target: "edit", "paste {}x{} columns offset y {oy}", dx + 1, dz + 1);
    for y in 0..256 {
        for x in 0..=dx {
            for z in 0..=dz {
                let w = ed.get_block(c1.x + x * scx, y, c1.z + z * scz);
                ed.builder_block(p1.x + x * spx, y + oy, p1.z + z * spz, w);
            }
        }
    }
}
