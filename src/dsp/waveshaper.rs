/// Soft-clipping transfer curve, sampled into a 512-point table.
///
/// The shape is `y = (pi + a)x / (pi + a|x|)`: identity-ish near zero,
/// saturating hard toward +/-1 as the drive `a` grows. Input outside
/// [-1, 1] clamps to the table ends, which is itself part of the sound.
pub struct TransferCurve {
    table: Vec<f32>,
}

const CURVE_POINTS: usize = 512;

impl TransferCurve {
    pub fn overdrive(amount: f32) -> Self {
        let n = CURVE_POINTS;
        let table = (0..n)
            .map(|i| {
                let x = (i as f32 * 2.0) / n as f32 - 1.0;
                ((std::f32::consts::PI + amount) * x)
                    / (std::f32::consts::PI + amount * x.abs())
            })
            .collect();
        Self { table }
    }

    /// Shape one sample through the table with linear interpolation.
    #[inline]
    pub fn shape(&self, x: f32) -> f32 {
        let n = self.table.len();
        let pos = (x.clamp(-1.0, 1.0) + 1.0) * 0.5 * (n - 1) as f32;
        let idx = pos as usize;
        let frac = pos - idx as f32;
        if idx + 1 < n {
            self.table[idx] + (self.table[idx + 1] - self.table[idx]) * frac
        } else {
            self.table[n - 1]
        }
    }

    pub fn render(&self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.shape(*sample);
        }
    }
}
