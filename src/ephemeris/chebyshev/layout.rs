//! DE405 block layout: the fixed per-series coefficient table and the public
//! body enumeration mapped onto it.

/// Earth-Moon mass ratio used by the DE405 body compositions.
pub const EARTH_MOON_MASS_RATIO: f64 = 81.30056;

/// Coefficient words per block, JD bounds included (DE405).
pub const BLOCK_COEFFICIENTS: usize = 1018;

/// Days covered by one block.
pub const BLOCK_DAYS: f64 = 32.0;

/// Placement of one Chebyshev series inside a block.
///
/// `offset` is 1-based and counts from the start of the block, whose first
/// two words are the block's JD start and end. Each of the `n_sub`
/// sub-intervals holds `n_coeff` coefficients per component, components
/// stored consecutively within a sub-interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesLayout {
    pub offset: usize,
    pub n_coeff: usize,
    pub n_sub: usize,
    pub n_components: usize,
}

/// The 13 series of a DE405 block, in internal numbering order.
///
/// Indices 0..=10 are solar-system bodies (Moon geocentric, everything else
/// barycentric); 11 is the nutation angle pair and 12 the lunar libration
/// angles, carried for layout completeness but not exposed as bodies.
pub const DE405_LAYOUT: [SeriesLayout; 13] = [
    SeriesLayout { offset: 3, n_coeff: 14, n_sub: 4, n_components: 3 },   // Mercury
    SeriesLayout { offset: 171, n_coeff: 10, n_sub: 2, n_components: 3 }, // Venus
    SeriesLayout { offset: 231, n_coeff: 13, n_sub: 2, n_components: 3 }, // Earth-Moon barycenter
    SeriesLayout { offset: 309, n_coeff: 11, n_sub: 1, n_components: 3 }, // Mars
    SeriesLayout { offset: 342, n_coeff: 8, n_sub: 1, n_components: 3 },  // Jupiter
    SeriesLayout { offset: 366, n_coeff: 7, n_sub: 1, n_components: 3 },  // Saturn
    SeriesLayout { offset: 387, n_coeff: 6, n_sub: 1, n_components: 3 },  // Uranus
    SeriesLayout { offset: 405, n_coeff: 6, n_sub: 1, n_components: 3 },  // Neptune
    SeriesLayout { offset: 423, n_coeff: 6, n_sub: 1, n_components: 3 },  // Pluto
    SeriesLayout { offset: 441, n_coeff: 13, n_sub: 8, n_components: 3 }, // Moon (geocentric)
    SeriesLayout { offset: 753, n_coeff: 11, n_sub: 2, n_components: 3 }, // Sun
    SeriesLayout { offset: 819, n_coeff: 10, n_sub: 4, n_components: 2 }, // Nutations
    SeriesLayout { offset: 899, n_coeff: 10, n_sub: 4, n_components: 3 }, // Librations
];

/// Internal series index of the geocentric Moon.
pub(crate) const MOON_GEOCENTRIC: usize = 9;

/// Internal series index of the Earth-Moon barycenter.
pub(crate) const EARTH_MOON_BARYCENTER: usize = 2;

/// Publicly addressable bodies.
///
/// Distinct from the internal series numbering: `Earth`, `Moon` and
/// `SolarSystemBarycenter` are algebraic compositions of stored series, not
/// series themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Sun,
    EarthMoonBarycenter,
    SolarSystemBarycenter,
}

impl Body {
    /// Internal series index for bodies stored directly in the file.
    /// Composed bodies return `None`.
    pub(crate) fn series_index(&self) -> Option<usize> {
        match self {
            Body::Mercury => Some(0),
            Body::Venus => Some(1),
            Body::EarthMoonBarycenter => Some(EARTH_MOON_BARYCENTER),
            Body::Mars => Some(3),
            Body::Jupiter => Some(4),
            Body::Saturn => Some(5),
            Body::Uranus => Some(6),
            Body::Neptune => Some(7),
            Body::Pluto => Some(8),
            Body::Sun => Some(10),
            Body::Earth | Body::Moon | Body::SolarSystemBarycenter => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Moon => "Moon",
            Body::Sun => "Sun",
            Body::EarthMoonBarycenter => "Earth-Moon barycenter",
            Body::SolarSystemBarycenter => "Solar-system barycenter",
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
