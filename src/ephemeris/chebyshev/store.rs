//! ASCII DE405 block reader and the Chebyshev ephemeris store.

use std::sync::Arc;

use camino::Utf8Path;
use itertools::Itertools;

use crate::astrodyn_errors::AstrodynError;
use crate::constants::{JD, MJD, JDTOMJD};
use crate::ephemeris::chebyshev::block::EphemerisBlock;
use crate::ephemeris::chebyshev::layout::{
    Body, BLOCK_COEFFICIENTS, BLOCK_DAYS, DE405_LAYOUT, EARTH_MOON_BARYCENTER,
    EARTH_MOON_MASS_RATIO, MOON_GEOCENTRIC,
};
use crate::ephemeris::EphemerisSource;
use crate::state::State;
use crate::time::{AtomicTime, TimeConstraint, TimeInterval, TimeScale};

/// A fully parsed DE405-style ephemeris: contiguous 32-day coefficient
/// blocks, evaluated per body on demand.
///
/// The file is read once at construction; evaluation never touches the disk.
#[derive(Debug, Clone)]
pub struct ChebyshevEphemeris {
    file: String,
    blocks: Vec<EphemerisBlock>,
    jd_start: JD,
    jd_end: JD,
    coverage: TimeConstraint,
}

impl ChebyshevEphemeris {
    pub fn read(path: &Utf8Path) -> Result<Self, AstrodynError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(path.as_str(), &text)
    }

    /// Parse an ASCII block stream.
    ///
    /// Each block is a header line `block_number ncoeff` followed by `ncoeff`
    /// Fortran-style doubles (`D` exponent marker), three per line; the final
    /// line may be zero-padded. `ncoeff` must match the DE405 constant and
    /// consecutive blocks must abut exactly in time.
    pub fn parse(file: &str, text: &str) -> Result<Self, AstrodynError> {
        let mut blocks: Vec<EphemerisBlock> = Vec::new();
        let mut lines = text.lines().enumerate();

        while let Some((header_index, header)) = lines.next() {
            if header.trim().is_empty() {
                continue;
            }
            let mut fields = header.split_whitespace();
            let numbers = (
                fields.next().and_then(|tok| tok.parse::<usize>().ok()),
                fields.next().and_then(|tok| tok.parse::<usize>().ok()),
                fields.next(),
            );
            let ncoeff = match numbers {
                (Some(_block_number), Some(ncoeff), None) => ncoeff,
                _ => {
                    return Err(AstrodynError::InvalidHeaderLine {
                        file: file.to_string(),
                        line: header_index + 1,
                        expected: "block number and coefficient count".to_string(),
                    })
                }
            };
            if ncoeff != BLOCK_COEFFICIENTS {
                return Err(AstrodynError::InvalidBlockSize {
                    file: file.to_string(),
                    block: blocks.len(),
                    expected: BLOCK_COEFFICIENTS,
                    found: ncoeff,
                });
            }

            let mut words: Vec<f64> = Vec::with_capacity(ncoeff);
            while words.len() < ncoeff {
                let Some((line_index, line)) = lines.next() else {
                    return Err(AstrodynError::InvalidRecord {
                        file: file.to_string(),
                        line: header_index + 1,
                        message: format!(
                            "block ends after {} of {} coefficients",
                            words.len(),
                            ncoeff
                        ),
                    });
                };
                for token in line.split_whitespace() {
                    let value = token.replace(['D', 'd'], "E").parse::<f64>().map_err(|_| {
                        AstrodynError::InvalidRecord {
                            file: file.to_string(),
                            line: line_index + 1,
                            message: format!("invalid coefficient: {token}"),
                        }
                    })?;
                    words.push(value);
                }
            }
            // Trailing values on the last line are line padding.
            words.truncate(ncoeff);
            blocks.push(EphemerisBlock::new(words));
        }

        if blocks.is_empty() {
            return Err(AstrodynError::InvalidRecord {
                file: file.to_string(),
                line: 0,
                message: "file contains no coefficient blocks".to_string(),
            });
        }

        for (index, (a, b)) in blocks.iter().tuple_windows().enumerate() {
            if a.jd_end() != b.jd_start() {
                return Err(AstrodynError::NonContiguousBlocks {
                    file: file.to_string(),
                    block: index + 1,
                    expected_start: a.jd_end(),
                    found_start: b.jd_start(),
                });
            }
        }

        let jd_start = blocks[0].jd_start();
        let jd_end = blocks[blocks.len() - 1].jd_end();
        let coverage = TimeConstraint::from_interval(TimeInterval::from_bounds(
            AtomicTime::from_mjd(TimeScale::Tdb, jd_start - JDTOMJD)?,
            AtomicTime::from_mjd(TimeScale::Tdb, jd_end - JDTOMJD)?,
        )?);

        Ok(ChebyshevEphemeris {
            file: file.to_string(),
            blocks,
            jd_start,
            jd_end,
            coverage,
        })
    }

    pub fn jd_start(&self) -> JD {
        self.jd_start
    }

    pub fn jd_end(&self) -> JD {
        self.jd_end
    }

    pub fn coverage(&self) -> &TimeConstraint {
        &self.coverage
    }

    fn block_for(&self, mjd: MJD) -> Result<&EphemerisBlock, AstrodynError> {
        let jd = mjd + JDTOMJD;
        if jd < self.jd_start || jd > self.jd_end {
            return Err(AstrodynError::TimeOutOfRange(format!(
                "JD {jd} outside ephemeris span [{}, {}] of {}",
                self.jd_start, self.jd_end, self.file
            )));
        }
        let index = ((jd - self.jd_start) / BLOCK_DAYS) as usize;
        Ok(&self.blocks[index.min(self.blocks.len() - 1)])
    }

    /// Barycentric state of `body` at an MJD on the TDB scale.
    ///
    /// Composed bodies are exact algebraic identities over stored series:
    /// `earth = emb − moon_geo/(1+ratio)`, `moon = earth + moon_geo`, and the
    /// solar-system barycenter is the frame origin.
    pub fn state_at_mjd(&self, body: Body, mjd: MJD) -> Result<State, AstrodynError> {
        let block = self.block_for(mjd)?;
        match body {
            Body::SolarSystemBarycenter => Ok(State::zero()),
            Body::Earth => Ok(self.earth_from(block, mjd)),
            Body::Moon => {
                let moon_geo = block.evaluate(&DE405_LAYOUT[MOON_GEOCENTRIC], mjd);
                Ok(self.earth_from(block, mjd) + moon_geo)
            }
            _ => {
                let index = body.series_index().expect("direct bodies have a series");
                Ok(block.evaluate(&DE405_LAYOUT[index], mjd))
            }
        }
    }

    /// State of `body` relative to the Earth's center.
    pub fn geocentric_state_at_mjd(&self, body: Body, mjd: MJD) -> Result<State, AstrodynError> {
        Ok(self.state_at_mjd(body, mjd)? - self.state_at_mjd(Body::Earth, mjd)?)
    }

    fn earth_from(&self, block: &EphemerisBlock, mjd: MJD) -> State {
        let emb = block.evaluate(&DE405_LAYOUT[EARTH_MOON_BARYCENTER], mjd);
        let moon_geo = block.evaluate(&DE405_LAYOUT[MOON_GEOCENTRIC], mjd);
        emb - moon_geo.scale(1.0 / (1.0 + EARTH_MOON_MASS_RATIO))
    }
}

impl std::fmt::Display for ChebyshevEphemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} blocks, {} -> {}",
            self.file,
            self.blocks.len(),
            hifitime::Epoch::from_jde_et(self.jd_start),
            hifitime::Epoch::from_jde_et(self.jd_end),
        )
    }
}

/// One body of a shared Chebyshev store, viewed as an [`EphemerisSource`].
#[derive(Debug, Clone)]
pub struct BodyEphemeris {
    store: Arc<ChebyshevEphemeris>,
    body: Body,
}

impl BodyEphemeris {
    pub fn new(store: Arc<ChebyshevEphemeris>, body: Body) -> Self {
        BodyEphemeris { store, body }
    }

    pub fn body(&self) -> Body {
        self.body
    }
}

impl EphemerisSource for BodyEphemeris {
    fn barycentric_state(&self, t: &AtomicTime) -> Result<State, AstrodynError> {
        let mjd = t.to_mjd(TimeScale::Tdb)?;
        self.store.state_at_mjd(self.body, mjd)
    }

    fn coverage(&self) -> TimeConstraint {
        self.store.coverage().clone()
    }
}
