//! CCSDS OEM-like orbit ephemeris files.

use camino::Utf8Path;
use nalgebra::Vector3;

use crate::astrodyn_errors::AstrodynError;
use crate::constants::MJD;
use crate::ephemeris::tabulated::interpolator::{InterpolationMethod, TabulatedEphemeris};
use crate::state::State;
use crate::time::{AtomicTime, TimeFormat, TimeInterval, TimeScale};

/// A parsed OEM file: metadata plus the interpolatable trajectory.
#[derive(Debug, Clone)]
pub struct OrbitEphemerisMessage {
    pub object_name: String,
    pub center_name: String,
    pub start: AtomicTime,
    pub stop: AtomicTime,
    pub ephemeris: TabulatedEphemeris,
}

const DEFAULT_INTERPOLATION: InterpolationMethod = InterpolationMethod::Hermite;
const DEFAULT_DEGREE: usize = 7;

impl OrbitEphemerisMessage {
    pub fn read(path: &Utf8Path) -> Result<Self, AstrodynError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(path.as_str(), &text)
    }

    /// Parse the keyword=value metadata block followed by whitespace-
    /// delimited `epoch x y z vx vy vz` records, in km and km/s on the TDB
    /// scale. Records run to end of file or a `COVARIANCE_START` line.
    pub fn parse(file: &str, text: &str) -> Result<Self, AstrodynError> {
        let time_format = TimeFormat::new(TimeScale::Tdb, 6);

        let mut object_name: Option<String> = None;
        let mut center_name: Option<String> = None;
        let mut start: Option<AtomicTime> = None;
        let mut stop: Option<AtomicTime> = None;
        let mut useable_start: Option<AtomicTime> = None;
        let mut useable_stop: Option<AtomicTime> = None;
        let mut method = DEFAULT_INTERPOLATION;
        let mut degree = DEFAULT_DEGREE;

        let mut times: Vec<MJD> = Vec::new();
        let mut states: Vec<State> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            let line_no = index + 1;
            if line.is_empty() || line.starts_with("COMMENT") {
                continue;
            }
            if line == "COVARIANCE_START" {
                break;
            }

            if let Some((keyword, value)) = line.split_once('=') {
                let keyword = keyword.trim();
                let value = value.trim();
                match keyword {
                    "CCSDS_OEM_VERS" | "CREATION_DATE" | "ORIGINATOR" => {}
                    "OBJECT_NAME" => object_name = Some(value.to_string()),
                    "OBJECT_ID" => {}
                    "CENTER_NAME" => center_name = Some(value.to_string()),
                    "REF_FRAME" => {
                        if value != "EME2000" {
                            return Err(AstrodynError::InvalidRecord {
                                file: file.to_string(),
                                line: line_no,
                                message: format!("REF_FRAME must be EME2000, found {value}"),
                            });
                        }
                    }
                    "TIME_SYSTEM" => {
                        if value != "TDB" {
                            return Err(AstrodynError::InvalidRecord {
                                file: file.to_string(),
                                line: line_no,
                                message: format!("TIME_SYSTEM must be TDB, found {value}"),
                            });
                        }
                    }
                    "START_TIME" => start = Some(time_format.parse(value)?),
                    "STOP_TIME" => stop = Some(time_format.parse(value)?),
                    "USEABLE_START_TIME" => useable_start = Some(time_format.parse(value)?),
                    "USEABLE_STOP_TIME" => useable_stop = Some(time_format.parse(value)?),
                    "INTERPOLATION" => {
                        method = value.parse().map_err(|_| AstrodynError::InvalidRecord {
                            file: file.to_string(),
                            line: line_no,
                            message: format!("unknown interpolation method: {value}"),
                        })?
                    }
                    "INTERPOLATION_DEGREE" => {
                        degree = value.parse().map_err(|_| AstrodynError::InvalidRecord {
                            file: file.to_string(),
                            line: line_no,
                            message: format!("invalid interpolation degree: {value}"),
                        })?
                    }
                    other => {
                        return Err(AstrodynError::UnexpectedKeyword {
                            file: file.to_string(),
                            line: line_no,
                            keyword: other.to_string(),
                        })
                    }
                }
                continue;
            }

            // Data record: epoch then six state components.
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 7 {
                return Err(AstrodynError::InvalidRecord {
                    file: file.to_string(),
                    line: line_no,
                    message: format!("expected epoch and 6 state components, found {} fields", fields.len()),
                });
            }
            let epoch = time_format.parse(fields[0])?;
            let mut components = [0.0_f64; 6];
            for (slot, field) in components.iter_mut().zip(&fields[1..]) {
                *slot = field.parse().map_err(|_| AstrodynError::InvalidRecord {
                    file: file.to_string(),
                    line: line_no,
                    message: format!("invalid state component: {field}"),
                })?;
            }
            times.push(epoch.to_mjd(TimeScale::Tdb)?);
            states.push(State::new(
                Vector3::new(components[0], components[1], components[2]),
                Vector3::new(components[3], components[4], components[5]),
            ));
        }

        let missing = |what: &str| AstrodynError::InvalidRecord {
            file: file.to_string(),
            line: 0,
            message: format!("missing {what}"),
        };
        let object_name = object_name.ok_or_else(|| missing("OBJECT_NAME"))?;
        let center_name = center_name.ok_or_else(|| missing("CENTER_NAME"))?;
        let start = start.ok_or_else(|| missing("START_TIME"))?;
        let stop = stop.ok_or_else(|| missing("STOP_TIME"))?;

        let window = TimeInterval::from_bounds(
            useable_start.unwrap_or(start),
            useable_stop.unwrap_or(stop),
        )?;
        let ephemeris =
            TabulatedEphemeris::new(file, times, states, method, degree)?.restricted_to(window);

        Ok(OrbitEphemerisMessage {
            object_name,
            center_name,
            start,
            stop,
            ephemeris,
        })
    }
}
