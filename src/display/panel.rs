use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt::{Display, Write};
use utoipa::ToSchema;

use crate::position::Reading;

pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PanelField {
    pub label: String,
    pub value: String,
    /// Empty while the value is the placeholder.
    pub unit: String,
}

impl PanelField {
    fn new(label: &str, value: Option<String>, unit: &str) -> Self {
        match value {
            Some(value) => PanelField {
                label: label.to_string(),
                value,
                unit: unit.to_string(),
            },
            None => PanelField {
                label: label.to_string(),
                value: PLACEHOLDER.to_string(),
                unit: String::new(),
            },
        }
    }
}

/// The six labeled readouts shown next to the map.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayPanel {
    pub fields: Vec<PanelField>,
}

impl DisplayPanel {
    pub fn build<Tz>(reading: Option<&Reading>, tz: &Tz, time_format: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let fields = vec![
            PanelField::new("LAT", reading.map(|r| two_decimals(r.latitude)), ""),
            PanelField::new("LON", reading.map(|r| two_decimals(r.longitude)), ""),
            PanelField::new(
                "ALT",
                reading.and_then(|r| r.altitude).map(two_decimals),
                "km",
            ),
            PanelField::new(
                "VEL",
                reading.and_then(|r| r.velocity).map(two_decimals),
                "km/h",
            ),
            PanelField::new(
                "TIME",
                reading.and_then(|r| local_time(r.timestamp, tz, time_format)),
                "",
            ),
            PanelField::new(
                "VIS",
                reading
                    .and_then(|r| r.visibility.as_deref())
                    .map(str::to_uppercase),
                "",
            ),
        ];

        DisplayPanel { fields }
    }

    /// One `LABEL: value unit` line per field.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for field in &self.fields {
            let _ = write!(out, "{:>4}: {}", field.label, field.value);
            if !field.unit.is_empty() {
                let _ = write!(out, " {}", field.unit);
            }
            out.push('\n');
        }
        out
    }
}

fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

fn local_time<Tz>(timestamp: i64, tz: &Tz, time_format: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let utc = DateTime::from_timestamp(timestamp, 0)?;
    let mut out = String::new();
    // An invalid pattern surfaces as a fmt error rather than a panic here.
    write!(out, "{}", utc.with_timezone(tz).format(time_format)).ok()?;
    Some(out)
}
