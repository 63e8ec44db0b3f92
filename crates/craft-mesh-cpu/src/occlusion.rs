use crate::tables::{CURVE, LOOKUP3, LOOKUP4};

/// Per-face, per-corner ambient occlusion and light, both in `[0, 1]`
/// (light can exceed 1 next to a source).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerShading {
    pub ao: [[f32; 4]; 6],
    pub light: [[f32; 4]; 6],
}

impl CornerShading {
    /// Flat shading used for player boxes.
    pub const fn uniform(ao: f32, light: f32) -> Self {
        Self {
            ao: [[ao; 4]; 6],
            light: [[light; 4]; 6],
        }
    }

    pub fn min_ao(&self) -> f32 {
        self.ao.iter().flatten().fold(1.0, |m, &v| m.min(v))
    }

    pub fn max_light(&self) -> f32 {
        self.light.iter().flatten().fold(0.0, |m, &v| m.max(v))
    }
}

/// Shades all 24 face corners of a block from its 27-cell neighbourhood.
///
/// A corner whose two edge cells are both opaque is fully occluded
/// regardless of the diagonal cell. A block holding a full-strength source
/// is lit uniformly.
pub fn occlusion(neighbors: &[bool; 27], lights: &[u8; 27], shades: &[f32; 27]) -> CornerShading {
    let mut out = CornerShading::default();
    let is_light = lights[13] == 15;
    for i in 0..6 {
        for j in 0..4 {
            let [corner, side1, side2] = LOOKUP3[i][j].map(|k| neighbors[k]);
            let value = if side1 && side2 {
                3
            } else {
                corner as usize + side1 as usize + side2 as usize
            };
            let mut shade_sum = 0.0;
            let mut light_sum = 0.0;
            for &k in &LOOKUP4[i][j] {
                shade_sum += shades[k];
                light_sum += lights[k] as f32;
            }
            if is_light {
                light_sum = (15 * 4 * 10) as f32;
            }
            out.ao[i][j] = (CURVE[value] + shade_sum / 4.0).min(1.0);
            out.light[i][j] = light_sum / 15.0 / 4.0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_space_is_unoccluded_and_dark() {
        let s = occlusion(&[false; 27], &[0; 27], &[0.0; 27]);
        assert_eq!(s, CornerShading::default());
    }

    #[test]
    fn two_sides_saturate_the_curve() {
        let mut n = [false; 27];
        // left face, first corner: edges 1 and 3
        n[1] = true;
        n[3] = true;
        let s = occlusion(&n, &[0; 27], &[0.0; 27]);
        assert_eq!(s.ao[0][0], 0.75);
        n[0] = true;
        let s = occlusion(&n, &[0; 27], &[0.0; 27]);
        assert_eq!(s.ao[0][0], 0.75);
    }

    #[test]
    fn shade_adds_and_clamps() {
        let mut n = [false; 27];
        n[0] = true;
        let shades = [1.0; 27];
        let s = occlusion(&n, &[0; 27], &shades);
        assert_eq!(s.ao[0][0], 1.0);
        assert_eq!(s.ao[5][3], 1.0);
    }

    #[test]
    fn full_source_overrides_light() {
        let mut lights = [0u8; 27];
        lights[13] = 15;
        let s = occlusion(&[false; 27], &lights, &[0.0; 27]);
        assert!(s.light.iter().flatten().all(|&l| l == 10.0));
        lights[13] = 14;
        let s = occlusion(&[false; 27], &lights, &[0.0; 27]);
        // the centre cell is never sampled by a corner
        assert!(s.light.iter().flatten().all(|&l| l == 0.0));
        lights[12] = 14;
        let s = occlusion(&[false; 27], &lights, &[0.0; 27]);
        assert!((s.light[4][0] - 14.0 / 60.0).abs() < 1e-6);
        assert_eq!(s.light[5][0], 0.0);
    }
}
