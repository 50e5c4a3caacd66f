use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

use crate::web::config::MapConfig;

pub const DEFAULT_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const DEFAULT_ZOOM: u8 = 3;
pub const FLY_DURATION: Duration = Duration::from_millis(1500);

const POPUP_TITLE: &str = "INTERNATIONAL SPACE STATION";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: Vec<String>,
}

/// How the map view moves to the marker.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Initial placement, no animation.
    SetView {
        latitude: f64,
        longitude: f64,
        zoom: u8,
    },
    /// Animated re-center that keeps the current zoom.
    FlyTo {
        latitude: f64,
        longitude: f64,
        duration_secs: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapFrame {
    pub tile_url: String,
    pub attribution: String,
    pub marker: Marker,
    pub transition: Transition,
}

#[derive(Debug, Clone)]
pub struct MapView {
    tile_url: String,
    attribution: String,
    zoom: u8,
    fly_duration: Duration,
    mounted: bool,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

impl MapView {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            tile_url: config.tile_url.clone(),
            attribution: config.attribution.clone(),
            zoom: config.zoom,
            fly_duration: config.fly_duration,
            mounted: false,
        }
    }

    /// Renders the marker at the given position. The first render places the
    /// view; every later one flies to the new position.
    pub fn render(&mut self, latitude: f64, longitude: f64) -> MapFrame {
        let transition = if self.mounted {
            Transition::FlyTo {
                latitude,
                longitude,
                duration_secs: self.fly_duration.as_secs_f64(),
            }
        } else {
            self.mounted = true;
            Transition::SetView {
                latitude,
                longitude,
                zoom: self.zoom,
            }
        };

        MapFrame {
            tile_url: self.tile_url.clone(),
            attribution: self.attribution.clone(),
            marker: Marker {
                latitude,
                longitude,
                popup: popup_lines(latitude, longitude),
            },
            transition,
        }
    }
}

pub fn popup_lines(latitude: f64, longitude: f64) -> Vec<String> {
    vec![
        POPUP_TITLE.to_string(),
        format!("LAT: {:.4}°", latitude),
        format!("LON: {:.4}°", longitude),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_render_sets_view_at_default_zoom() {
        let mut map = MapView::default();

        let frame = map.render(10.0, 20.0);

        assert_eq!(
            frame.transition,
            Transition::SetView {
                latitude: 10.0,
                longitude: 20.0,
                zoom: 3
            }
        );
        assert_eq!(frame.tile_url, DEFAULT_TILE_URL);
    }

    #[test]
    fn second_distinct_position_flies_to_new_coordinates() {
        let mut map = MapView::default();
        map.render(10.0, 20.0);

        let frame = map.render(-33.5, 151.25);

        assert_eq!(
            frame.transition,
            Transition::FlyTo {
                latitude: -33.5,
                longitude: 151.25,
                duration_secs: 1.5
            }
        );
        assert_eq!(frame.marker.latitude, -33.5);
        assert_eq!(frame.marker.longitude, 151.25);
    }

    #[test]
    fn popup_shows_four_decimals() {
        let lines = popup_lines(51.123456, -0.98765);
        assert_eq!(
            lines,
            vec![
                "INTERNATIONAL SPACE STATION".to_string(),
                "LAT: 51.1235°".to_string(),
                "LON: -0.9877°".to_string(),
            ]
        );
    }

    #[test]
    fn transition_serializes_with_kind_tag() {
        let value = serde_json::to_value(Transition::FlyTo {
            latitude: 1.0,
            longitude: 2.0,
            duration_secs: 1.5,
        })
        .unwrap();
        assert_eq!(value["kind"], "fly_to");
        assert_eq!(value["duration_secs"], 1.5);
    }
}
