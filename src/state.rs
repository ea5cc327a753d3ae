//! Cartesian state vectors.

use nalgebra::Vector3;

use crate::constants::Kilometer;

/// Position (km) and velocity (km/s) of a body in some reference frame.
///
/// A plain value type with pure arithmetic: every operation returns a new
/// state and leaves its operands untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl State {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        State { position, velocity }
    }

    pub fn zero() -> Self {
        State {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        }
    }

    /// Componentwise scaling of both position and velocity.
    pub fn scale(&self, factor: f64) -> Self {
        State {
            position: self.position * factor,
            velocity: self.velocity * factor,
        }
    }

    /// Distance from the frame origin in km.
    pub fn range(&self) -> Kilometer {
        self.position.norm()
    }

    /// Line-of-sight speed `v · r̂` in km/s. Positive means receding.
    pub fn radial_velocity(&self) -> f64 {
        let r = self.position.norm();
        if r == 0.0 {
            return 0.0;
        }
        self.velocity.dot(&self.position) / r
    }
}

impl std::ops::Add for State {
    type Output = State;

    fn add(self, rhs: State) -> State {
        State {
            position: self.position + rhs.position,
            velocity: self.velocity + rhs.velocity,
        }
    }
}

impl std::ops::Sub for State {
    type Output = State;

    fn sub(self, rhs: State) -> State {
        State {
            position: self.position - rhs.position,
            velocity: self.velocity - rhs.velocity,
        }
    }
}

impl std::ops::Neg for State {
    type Output = State;

    fn neg(self) -> State {
        State {
            position: -self.position,
            velocity: -self.velocity,
        }
    }
}
