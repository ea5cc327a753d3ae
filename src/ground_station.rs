//! Ground-station site catalog, read from a simple XML document.

use camino::Utf8Path;
use regex::Regex;

use crate::astrodyn_errors::AstrodynError;
use crate::constants::{Degree, Kilometer};

/// A tracking site. Longitude is kept in [0, 360) degrees east; latitude in
/// degrees north; altitude in kilometers above the reference ellipsoid.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundStation {
    pub id: String,
    pub name: String,
    pub longitude: Degree,
    pub latitude: Degree,
    pub altitude: Kilometer,
}

pub fn read_ground_stations(path: &Utf8Path) -> Result<Vec<GroundStation>, AstrodynError> {
    let text = std::fs::read_to_string(path)?;
    parse_ground_stations(path.as_str(), &text)
}

/// Extract every `ground_station` element with its `id` attribute and
/// `name`/`longitude`/`latitude`/`altitude` children.
pub fn parse_ground_stations(
    file: &str,
    text: &str,
) -> Result<Vec<GroundStation>, AstrodynError> {
    let element = Regex::new(
        r#"(?s)<ground_station\s+id\s*=\s*"([^"]*)"\s*>(.*?)</ground_station>"#,
    )
    .expect("valid regex");
    let child = |tag: &str| {
        Regex::new(&format!(r"(?s)<{tag}>\s*(.*?)\s*</{tag}>")).expect("valid regex")
    };
    let name_re = child("name");
    let longitude_re = child("longitude");
    let latitude_re = child("latitude");
    let altitude_re = child("altitude");

    let line_of = |offset: usize| text[..offset].lines().count().max(1);

    let mut stations = Vec::new();
    for capture in element.captures_iter(text) {
        let id = capture[1].to_string();
        let body = &capture[2];
        let line = line_of(capture.get(0).map_or(0, |m| m.start()));
        let field = |re: &Regex, tag: &str| -> Result<String, AstrodynError> {
            re.captures(body)
                .map(|c| c[1].to_string())
                .ok_or_else(|| AstrodynError::InvalidRecord {
                    file: file.to_string(),
                    line,
                    message: format!("ground_station {id} is missing <{tag}>"),
                })
        };
        let number = |re: &Regex, tag: &str| -> Result<f64, AstrodynError> {
            let raw = field(re, tag)?;
            raw.parse().map_err(|_| AstrodynError::InvalidRecord {
                file: file.to_string(),
                line,
                message: format!("ground_station {id} has invalid <{tag}>: {raw}"),
            })
        };

        let name = field(&name_re, "name")?;
        let longitude = number(&longitude_re, "longitude")?.rem_euclid(360.0);
        let latitude = number(&latitude_re, "latitude")?;
        let altitude = number(&altitude_re, "altitude")?;
        stations.push(GroundStation {
            id,
            name,
            longitude,
            latitude,
            altitude,
        });
    }
    Ok(stations)
}
