//! One 32-day coefficient block and its Chebyshev evaluation.

use nalgebra::Vector3;

use crate::constants::{JD, MJD, JDTOMJD, SECONDS_PER_DAY};
use crate::ephemeris::chebyshev::layout::{SeriesLayout, BLOCK_DAYS};
use crate::state::State;

/// A block of Chebyshev coefficients covering 32 days.
///
/// `coefficients` holds the full block including the two leading JD words,
/// so series offsets from the layout table index it 1-based directly.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisBlock {
    coefficients: Vec<f64>,
}

impl EphemerisBlock {
    pub fn new(coefficients: Vec<f64>) -> Self {
        debug_assert!(coefficients.len() >= 2);
        EphemerisBlock { coefficients }
    }

    pub fn jd_start(&self) -> JD {
        self.coefficients[0]
    }

    pub fn jd_end(&self) -> JD {
        self.coefficients[1]
    }

    /// Evaluate a series at `mjd` (TDB), which must fall inside this block.
    ///
    /// The sub-interval is selected by the block-relative fraction, the
    /// normalized abscissa mapped onto [-1, 1], and position/velocity summed
    /// with the Chebyshev recurrences
    /// `T0=1, T1=x, Tn=2x·Tn-1 − Tn-2` and
    /// `U0=0, U1=1, U2=4x, Un=2x·Un-1 + 2·Tn-1 − Un-2`.
    /// Velocities scale by `2·n_sub / (32·86400)` to yield km/s.
    pub fn evaluate(&self, layout: &SeriesLayout, mjd: MJD) -> State {
        let jd = mjd + JDTOMJD;
        let block_fraction = (jd - self.jd_start()) / BLOCK_DAYS;
        let scaled = block_fraction * layout.n_sub as f64;
        let sub = (scaled.floor() as usize).min(layout.n_sub - 1);
        let x = 2.0 * (scaled - sub as f64) - 1.0;

        let n = layout.n_coeff;
        let mut t = vec![0.0; n];
        let mut u = vec![0.0; n];
        for k in 0..n {
            t[k] = match k {
                0 => 1.0,
                1 => x,
                _ => 2.0 * x * t[k - 1] - t[k - 2],
            };
            u[k] = match k {
                0 => 0.0,
                1 => 1.0,
                2 => 4.0 * x,
                _ => 2.0 * x * u[k - 1] + 2.0 * t[k - 1] - u[k - 2],
            };
        }

        let vfac = 2.0 * layout.n_sub as f64 / (BLOCK_DAYS * SECONDS_PER_DAY);
        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        for component in 0..layout.n_components.min(3) {
            let base = layout.offset - 1 + (sub * layout.n_components + component) * n;
            let coeffs = &self.coefficients[base..base + n];
            position[component] = coeffs.iter().zip(&t).map(|(a, tk)| a * tk).sum();
            velocity[component] =
                vfac * coeffs.iter().zip(&u).map(|(a, uk)| a * uk).sum::<f64>();
        }
        State::new(position, velocity)
    }
}

impl std::fmt::Display for EphemerisBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "block {} -> {} ({} coefficients)",
            hifitime::Epoch::from_jde_et(self.jd_start()),
            hifitime::Epoch::from_jde_et(self.jd_end()),
            self.coefficients.len(),
        )
    }
}
