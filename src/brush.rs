// Radial falloff brush: how much heat one dab adds around its center.

use crate::field::IntensityField;

/// Precomputed dab weights for one (radius, intensity) pair.
///
/// Offsets cover `[-reach, reach)` on both axes, `reach = ceil(radius)`.
/// Weight falls off linearly from `factor` at the center to 0 at `radius`.
pub struct Brush {
    reach: i32,
    weights: Vec<f32>,
}

impl Brush {
    pub fn new(radius: f32, factor: f32) -> Self {
        if radius.is_nan() || radius <= 0.0 {
            return Self {
                reach: 0,
                weights: Vec::new(),
            };
        }
        // 1) Kernel covers offsets [-reach, reach) on both axes.
        let reach = radius.ceil() as i32;
        let side = (2 * reach) as usize;
        let mut weights = Vec::with_capacity(side * side);

        // 2) Linear falloff: full `factor` at the center, 0 on the radius.
        //    Visual: a soft round spot instead of a hard-edged disc.
        for j in -reach..reach {
            for i in -reach..reach {
                let distance = ((i * i + j * j) as f32).sqrt();
                let w = if distance < radius {
                    factor * (1.0 - distance / radius)
                } else {
                    0.0
                };
                weights.push(w);
            }
        }

        Self { reach, weights }
    }

    pub fn reach(&self) -> i32 {
        self.reach
    }

    /// Weight at offset (i, j) from the center; 0 outside the disc.
    #[cfg(test)]
    pub(crate) fn weight(&self, i: i32, j: i32) -> f32 {
        let r = self.reach;
        if i < -r || i >= r || j < -r || j >= r {
            return 0.0;
        }
        let side = 2 * r;
        self.weights[((j + r) * side + (i + r)) as usize]
    }

    /// Deposit one dab centered at (cx, cy).
    pub fn dab(&self, field: &mut IntensityField, cx: i64, cy: i64) {
        let r = self.reach as i64;
        let (w, h) = (field.width() as i64, field.height() as i64);
        // Whole disc off the surface: nothing to do. Saturating so centers
        // near i64::MIN/MAX cannot overflow.
        if cx.saturating_add(r) < 0
            || cy.saturating_add(r) < 0
            || cx.saturating_sub(r) >= w
            || cy.saturating_sub(r) >= h
        {
            return;
        }

        // Past the check the center is within `r` of the surface, so
        // `cx + i` and `cy + j` stay small.

        let side = 2 * r;
        for (k, &weight) in self.weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            let k = k as i64;
            let i = k % side - r;
            let j = k / side - r;
            field.accumulate(cx + i, cy + j, weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_gets_full_factor() {
        let brush = Brush::new(5.0, 0.1);
        assert!((brush.weight(0, 0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn falloff_is_linear_and_zero_at_radius() {
        let brush = Brush::new(5.0, 0.1);
        // distance 3 -> 0.1 * (1 - 3/5)
        assert!((brush.weight(3, 0) - 0.04).abs() < 1e-6);
        assert!((brush.weight(0, -3) - 0.04).abs() < 1e-6);
        // distance 5 is on the boundary: excluded
        assert_eq!(brush.weight(0, -5), 0.0);
        // (3, 4) is distance 5 too
        assert_eq!(brush.weight(3, 4), 0.0);
        // half-open offset range: +5 is never visited
        assert_eq!(brush.weight(4, 4), 0.0);
    }

    #[test]
    fn dab_is_clipped_at_edges() {
        let mut field = IntensityField::allocate(6, 6).unwrap();
        let brush = Brush::new(5.0, 0.1);
        brush.dab(&mut field, 0, 0);
        assert!((field.get(0, 0).unwrap() - 0.1).abs() < 1e-6);
        assert!(field.get(4, 0).unwrap() > 0.0);
        assert_eq!(field.get(5, 0), Some(0.0));
    }

    #[test]
    fn far_away_dab_touches_nothing() {
        let mut field = IntensityField::allocate(6, 6).unwrap();
        let brush = Brush::new(5.0, 0.1);
        brush.dab(&mut field, -1_000_000, 3);
        brush.dab(&mut field, 3, 1_000_000);
        assert!(field.cells().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn extreme_centers_do_not_overflow() {
        let mut field = IntensityField::allocate(6, 6).unwrap();
        let brush = Brush::new(5.0, 0.1);
        brush.dab(&mut field, i64::MAX, 3);
        brush.dab(&mut field, i64::MIN, 3);
        brush.dab(&mut field, 3, i64::MAX);
        brush.dab(&mut field, 3, i64::MIN);
        brush.dab(&mut field, i64::MIN, i64::MAX);
        assert!(field.cells().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn non_positive_radius_is_empty() {
        let mut field = IntensityField::allocate(3, 3).unwrap();
        Brush::new(0.0, 0.1).dab(&mut field, 1, 1);
        Brush::new(-2.0, 0.1).dab(&mut field, 1, 1);
        assert!(field.cells().iter().all(|&v| v == 0.0));
    }
}
