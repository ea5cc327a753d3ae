//! JPL Horizons state-vector text files.

use camino::Utf8Path;
use nalgebra::Vector3;
use regex::Regex;

use crate::astrodyn_errors::AstrodynError;
use crate::constants::{MJD, JDTOMJD};
use crate::ephemeris::tabulated::interpolator::{InterpolationMethod, TabulatedEphemeris};
use crate::state::State;

/// A parsed Horizons vector file.
#[derive(Debug, Clone)]
pub struct HorizonsEphemeris {
    pub center_name: String,
    pub ephemeris: TabulatedEphemeris,
}

/// Header lines that must appear, with the value check applied to each.
const REQUIRED_HEADERS: [(&str, &str); 4] = [
    ("Reference frame", "ICRF/J2000.0"),
    ("Output units", "KM-S"),
    ("Output type", "GEOMETRIC"),
    ("Output format", "02"),
];

impl HorizonsEphemeris {
    pub fn read(
        path: &Utf8Path,
        method: InterpolationMethod,
        order: usize,
    ) -> Result<Self, AstrodynError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(path.as_str(), &text, method, order)
    }

    /// Parse the fixed header then the `$$SOE`/`$$EOE` record section, where
    /// each record is three lines: a JD (TDB) epoch, a position line and a
    /// velocity line, km and km/s.
    pub fn parse(
        file: &str,
        text: &str,
        method: InterpolationMethod,
        order: usize,
    ) -> Result<Self, AstrodynError> {
        let number = Regex::new(r"[-+]?[0-9]+\.[0-9]+(?:[EeDd][-+]?[0-9]+)?").expect("valid regex");

        let mut center_name: Option<String> = None;
        let mut seen = [false; REQUIRED_HEADERS.len()];
        let mut lines = text.lines().enumerate();

        // Header section, up to the start-of-ephemeris marker.
        let mut soe_line = 0;
        for (index, raw) in lines.by_ref() {
            let line = raw.trim();
            if line == "$$SOE" {
                soe_line = index + 1;
                break;
            }
            if let Some(value) = line.strip_prefix("Center body name:") {
                center_name = Some(value.trim().to_string());
                continue;
            }
            if let Some((label, value)) = line.split_once(':') {
                for (slot, (prefix, expected)) in seen.iter_mut().zip(REQUIRED_HEADERS) {
                    if label.trim_end().starts_with(prefix) {
                        if !value.contains(expected) {
                            return Err(AstrodynError::InvalidHeaderLine {
                                file: file.to_string(),
                                line: index + 1,
                                expected: format!("{prefix} containing {expected}"),
                            });
                        }
                        *slot = true;
                    }
                }
            }
        }
        if soe_line == 0 {
            return Err(AstrodynError::InvalidHeaderLine {
                file: file.to_string(),
                line: text.lines().count(),
                expected: "$$SOE record marker".to_string(),
            });
        }
        let center_name = center_name.ok_or_else(|| AstrodynError::InvalidHeaderLine {
            file: file.to_string(),
            line: soe_line,
            expected: "Center body name header".to_string(),
        })?;
        for (done, (prefix, expected)) in seen.iter().zip(REQUIRED_HEADERS) {
            if !done {
                return Err(AstrodynError::InvalidHeaderLine {
                    file: file.to_string(),
                    line: soe_line,
                    expected: format!("{prefix} header containing {expected}"),
                });
            }
        }

        let mut times: Vec<MJD> = Vec::new();
        let mut states: Vec<State> = Vec::new();
        loop {
            let Some((index, raw)) = lines.next() else {
                return Err(AstrodynError::InvalidRecord {
                    file: file.to_string(),
                    line: text.lines().count(),
                    message: "missing $$EOE record marker".to_string(),
                });
            };
            let line = raw.trim();
            if line == "$$EOE" {
                break;
            }
            if line.is_empty() {
                continue;
            }

            // Epoch line: the leading token is a JD on the TDB scale.
            let jd: f64 = line
                .split_whitespace()
                .next()
                .and_then(|tok| tok.parse().ok())
                .ok_or_else(|| AstrodynError::InvalidRecord {
                    file: file.to_string(),
                    line: index + 1,
                    message: format!("expected a JD epoch line, found: {line}"),
                })?;
            let position = Self::triplet(file, &mut lines, &number, "position")?;
            let velocity = Self::triplet(file, &mut lines, &number, "velocity")?;

            times.push(jd - JDTOMJD);
            states.push(State::new(position, velocity));
        }

        let ephemeris = TabulatedEphemeris::new(file, times, states, method, order)?;
        Ok(HorizonsEphemeris {
            center_name,
            ephemeris,
        })
    }

    /// Pull exactly three numbers off the next line.
    fn triplet<'a>(
        file: &str,
        lines: &mut impl Iterator<Item = (usize, &'a str)>,
        number: &Regex,
        what: &str,
    ) -> Result<Vector3<f64>, AstrodynError> {
        let (index, line) = lines.next().ok_or_else(|| AstrodynError::InvalidRecord {
            file: file.to_string(),
            line: 0,
            message: format!("record truncated before its {what} line"),
        })?;
        let values: Vec<f64> = number
            .find_iter(line)
            .filter_map(|m| m.as_str().replace(['D', 'd'], "E").parse().ok())
            .collect();
        if values.len() != 3 {
            return Err(AstrodynError::InvalidRecord {
                file: file.to_string(),
                line: index + 1,
                message: format!("expected 3 {what} components, found {}", values.len()),
            });
        }
        Ok(Vector3::new(values[0], values[1], values[2]))
    }
}
