use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Fractal simplex noise normalised to roughly `[0, 1]`.
///
/// Octaves are summed by hand on a unit-frequency OpenSimplex2 source so the
/// caller controls the scaling of every input coordinate.
pub struct Simplex {
    noise: FastNoiseLite,
}

impl Simplex {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    pub fn simplex2(&self, x: f32, y: f32, octaves: u32, persistence: f32, lacunarity: f32) -> f32 {
        let mut freq = 1.0_f32;
        let mut amp = 1.0_f32;
        let mut max = 1.0_f32;
        let mut total = self.noise.get_noise_2d(x, y);
        for _ in 1..octaves.max(1) {
            freq *= lacunarity;
            amp *= persistence;
            max += amp;
            total += self.noise.get_noise_2d(x * freq, y * freq) * amp;
        }
        (1.0 + total / max) / 2.0
    }

    pub fn simplex3(&self, x: f32, y: f32, z: f32, octaves: u32, persistence: f32, lacunarity: f32) -> f32 {
        let mut freq = 1.0_f32;
        let mut amp = 1.0_f32;
        let mut max = 1.0_f32;
        let mut total = self.noise.get_noise_3d(x, y, z);
        for _ in 1..octaves.max(1) {
            freq *= lacunarity;
            amp *= persistence;
            max += amp;
            total += self.noise.get_noise_3d(x * freq, y * freq, z * freq) * amp;
        }
        (1.0 + total / max) / 2.0
    }
}
