//! Fixed-window Hermite and Lagrange interpolation over tabulated states.

use nalgebra::Vector3;

use crate::astrodyn_errors::AstrodynError;
use crate::constants::{MJD, SECONDS_PER_DAY};
use crate::ephemeris::EphemerisSource;
use crate::state::State;
use crate::time::{AtomicTime, TimeConstraint, TimeInterval, TimeScale};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMethod {
    /// Matches position and velocity at every window sample.
    Hermite,
    /// Value-only fit; velocity samples are fitted independently.
    Lagrange,
}

impl std::str::FromStr for InterpolationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HERMITE" => Ok(InterpolationMethod::Hermite),
            "LAGRANGE" => Ok(InterpolationMethod::Lagrange),
            other => Err(format!("unknown interpolation method: {other}")),
        }
    }
}

/// An ordered table of sampled states with a configured interpolation
/// scheme.
///
/// The order is taken as given; whether it suits the actual sample spacing
/// is the caller's responsibility and is not revalidated here.
#[derive(Debug, Clone)]
pub struct TabulatedEphemeris {
    name: String,
    times: Vec<MJD>,
    states: Vec<State>,
    method: InterpolationMethod,
    order: usize,
    coverage: TimeConstraint,
}

impl TabulatedEphemeris {
    /// Build from parallel sample arrays. Times are MJD on the TDB scale and
    /// must be non-decreasing.
    pub fn new(
        name: &str,
        times: Vec<MJD>,
        states: Vec<State>,
        method: InterpolationMethod,
        order: usize,
    ) -> Result<Self, AstrodynError> {
        let invalid = |message: String| AstrodynError::InvalidRecord {
            file: name.to_string(),
            line: 0,
            message,
        };
        if times.is_empty() {
            return Err(invalid("ephemeris table has no samples".to_string()));
        }
        if times.len() != states.len() {
            return Err(invalid(format!(
                "{} sample times but {} states",
                times.len(),
                states.len()
            )));
        }
        if times.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(invalid("sample times must be non-decreasing".to_string()));
        }

        let coverage = TimeConstraint::from_interval(TimeInterval::from_bounds(
            AtomicTime::from_mjd(TimeScale::Tdb, times[0])?,
            AtomicTime::from_mjd(TimeScale::Tdb, times[times.len() - 1])?,
        )?);
        Ok(TabulatedEphemeris {
            name: name.to_string(),
            times,
            states,
            method,
            order,
            coverage,
        })
    }

    /// Narrow the advertised coverage, e.g. to a useable sub-window declared
    /// by the source file. Sample data is unaffected.
    pub fn restricted_to(mut self, window: TimeInterval) -> Self {
        self.coverage = self
            .coverage
            .intersection(&TimeConstraint::from_interval(window));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Samples used per evaluation: `order/2 + 1` rounded up to even for
    /// Hermite, `order + 1` for Lagrange. Never wider than the table.
    fn window_size(&self) -> usize {
        let n = match self.method {
            InterpolationMethod::Hermite => {
                let n = self.order / 2 + 1;
                n + n % 2
            }
            InterpolationMethod::Lagrange => self.order + 1,
        };
        n.min(self.times.len())
    }

    /// Interpolated state at an MJD on the TDB scale.
    ///
    /// Queries outside the sampled span fail with a range error; the window
    /// near the span edges is clipped to the table rather than extrapolated.
    pub fn state_at_mjd(&self, mjd: MJD) -> Result<State, AstrodynError> {
        let first = self.times[0];
        let last = self.times[self.times.len() - 1];
        if mjd < first || mjd > last {
            return Err(AstrodynError::TimeOutOfRange(format!(
                "MJD {mjd} outside tabulated span [{first}, {last}] of {}",
                self.name
            )));
        }

        let n = self.window_size();
        let right = self.times.partition_point(|&x| x < mjd);
        let start = right.saturating_sub(n / 2).min(self.times.len() - n);

        // Work in seconds from the window start so sampled velocities (km/s)
        // are the true derivatives of the abscissa.
        let t0 = self.times[start];
        let x: Vec<f64> = self.times[start..start + n]
            .iter()
            .map(|&ti| (ti - t0) * SECONDS_PER_DAY)
            .collect();
        let t = (mjd - t0) * SECONDS_PER_DAY;
        let window = &self.states[start..start + n];

        Ok(match self.method {
            InterpolationMethod::Hermite => hermite(&x, window, t),
            InterpolationMethod::Lagrange => lagrange(&x, window, t),
        })
    }
}

/// Multi-point Hermite evaluation with the two-point basis
/// (`phi00/phi01/phi10/phi11` form) extended by the sum-of-reciprocal
/// -distances term per sample.
fn hermite(x: &[f64], states: &[State], t: f64) -> State {
    let n = x.len();
    let mut position = Vector3::zeros();
    let mut velocity = Vector3::zeros();
    for i in 0..n {
        let mut li = 1.0;
        let mut denom = 1.0;
        let mut si = 0.0;
        for j in 0..n {
            if j == i {
                continue;
            }
            li *= t - x[j];
            denom *= x[i] - x[j];
            si += 1.0 / (x[i] - x[j]);
        }
        // Derivative of the Lagrange cardinal numerator.
        let mut lip = 0.0;
        for k in 0..n {
            if k == i {
                continue;
            }
            let mut product = 1.0;
            for j in 0..n {
                if j != i && j != k {
                    product *= t - x[j];
                }
            }
            lip += product;
        }
        let li = li / denom;
        let lip = lip / denom;

        let dt = t - x[i];
        let phi0 = (1.0 - 2.0 * dt * si) * li * li;
        let phi1 = dt * li * li;
        let dphi0 = -2.0 * si * li * li + (1.0 - 2.0 * dt * si) * 2.0 * li * lip;
        let dphi1 = li * li + dt * 2.0 * li * lip;

        position += states[i].position * phi0 + states[i].velocity * phi1;
        velocity += states[i].position * dphi0 + states[i].velocity * dphi1;
    }
    State::new(position, velocity)
}

/// Plain Lagrange cardinal-basis evaluation, applied to position and
/// velocity samples independently.
fn lagrange(x: &[f64], states: &[State], t: f64) -> State {
    let n = x.len();
    let mut position = Vector3::zeros();
    let mut velocity = Vector3::zeros();
    for i in 0..n {
        let mut li = 1.0;
        for j in 0..n {
            if j != i {
                li *= (t - x[j]) / (x[i] - x[j]);
            }
        }
        position += states[i].position * li;
        velocity += states[i].velocity * li;
    }
    State::new(position, velocity)
}

impl EphemerisSource for TabulatedEphemeris {
    fn barycentric_state(&self, t: &AtomicTime) -> Result<State, AstrodynError> {
        self.state_at_mjd(t.to_mjd(TimeScale::Tdb)?)
    }

    fn coverage(&self) -> TimeConstraint {
        self.coverage.clone()
    }
}
