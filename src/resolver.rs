//! Spacecraft-relative states with light-time and stellar-aberration
//! correction.

use std::collections::HashMap;
use std::sync::Arc;

use nalgebra::{Rotation3, Unit, Vector3};

use crate::astrodyn_errors::AstrodynError;
use crate::constants::VLIGHT;
use crate::ephemeris::chebyshev::Body;
use crate::ephemeris::EphemerisSource;
use crate::provider::Provider;
use crate::state::State;
use crate::time::{AtomicTime, TimeConstraint};

/// Correction applied to a relative state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Geometric: both states evaluated at the query time.
    None,
    /// Light-time: the target is evaluated at its emission epoch.
    LightTime,
    /// Light-time plus stellar aberration of the line of sight.
    LightTimeStellar,
}

/// Plain body-to-source map, usable directly or behind an
/// [`LruProvider`](crate::provider::LruProvider).
#[derive(Default)]
pub struct SourceRegistry {
    sources: HashMap<Body, Arc<dyn EphemerisSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, body: Body, source: Arc<dyn EphemerisSource>) {
        self.sources.insert(body, source);
    }
}

impl Provider<Body, Arc<dyn EphemerisSource>> for SourceRegistry {
    fn provide(&mut self, body: &Body) -> Result<Arc<dyn EphemerisSource>, AstrodynError> {
        self.sources
            .get(body)
            .cloned()
            .ok_or(AstrodynError::NoEphemerisForBody(*body))
    }
}

/// Composes a spacecraft ephemeris with per-body target sources to answer
/// relative-state queries.
pub struct RelativeStateResolver<P> {
    spacecraft: Arc<dyn EphemerisSource>,
    targets: P,
}

impl<P> RelativeStateResolver<P>
where
    P: Provider<Body, Arc<dyn EphemerisSource>>,
{
    pub fn new(spacecraft: Arc<dyn EphemerisSource>, targets: P) -> Self {
        RelativeStateResolver { spacecraft, targets }
    }

    /// Target state relative to the spacecraft at `t`, under the requested
    /// correction.
    ///
    /// Light-time is solved with three fixed refinement passes from the
    /// straight-line estimate; each pass re-evaluates the target at
    /// `t − lightTime` and recomputes the light time from the new range.
    pub fn relative_state(
        &mut self,
        body: Body,
        t: &AtomicTime,
        correction: Correction,
    ) -> Result<State, AstrodynError> {
        let target = self.targets.provide(&body)?;
        let observer = self.spacecraft.barycentric_state(t)?;
        let mut relative = target.barycentric_state(t)? - observer;
        if correction == Correction::None {
            return Ok(relative);
        }

        for _ in 0..3 {
            let light_seconds = relative.position.norm() / VLIGHT;
            let emission = t.add(-((light_seconds * 1e6).round() as i64));
            relative = target.barycentric_state(&emission)? - observer;
        }
        if correction == Correction::LightTimeStellar {
            relative = aberrated(relative, &observer.velocity);
        }
        Ok(relative)
    }

    /// Instants at which both the target and the spacecraft ephemerides are
    /// defined.
    pub fn availability(&mut self, body: Body) -> Result<TimeConstraint, AstrodynError> {
        let target = self.targets.provide(&body)?;
        Ok(target.coverage().intersection(&self.spacecraft.coverage()))
    }

    /// Line-of-sight speed of the target, from the fully corrected state.
    pub fn radial_velocity(&mut self, body: Body, t: &AtomicTime) -> Result<f64, AstrodynError> {
        Ok(self
            .relative_state(body, t, Correction::LightTimeStellar)?
            .radial_velocity())
    }
}

/// Rotate the line of sight by the stellar-aberration angle: axis
/// `h = r̂ × v/c`, angle `asin(|h|)`.
fn aberrated(relative: State, observer_velocity: &Vector3<f64>) -> State {
    let range = relative.position.norm();
    if range == 0.0 {
        return relative;
    }
    let h = (relative.position / range).cross(observer_velocity) / VLIGHT;
    let angle = h.norm().asin();
    if angle == 0.0 {
        return relative;
    }
    let axis = Unit::new_normalize(h);
    State::new(
        Rotation3::from_axis_angle(&axis, angle) * relative.position,
        relative.velocity,
    )
}
