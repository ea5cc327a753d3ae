//! Ephemeris sources: Chebyshev polynomial stores and tabulated
//! state-vector interpolators behind one trait.

pub mod chebyshev;
pub mod tabulated;

use crate::astrodyn_errors::AstrodynError;
use crate::state::State;
use crate::time::{AtomicTime, TimeConstraint};

/// A source of barycentric (or source-frame) states for one object.
///
/// Implementations are pure functions of the query time once constructed:
/// all file reads happen at construction, never during evaluation.
pub trait EphemerisSource {
    /// State of the object in the source's reference frame at `t`.
    ///
    /// Fails with a range error outside [`coverage`](Self::coverage).
    fn barycentric_state(&self, t: &AtomicTime) -> Result<State, AstrodynError>;

    /// Instants at which [`barycentric_state`](Self::barycentric_state) is
    /// defined.
    fn coverage(&self) -> TimeConstraint;
}
