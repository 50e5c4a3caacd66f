use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::status::StatusResponse;
use crate::display::{map::Marker, DisplayPanel, MapFrame, PanelField, Transition};
use crate::position::Reading;
use crate::tracker::Snapshot;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::status::status,
        super::api::status::refresh,
        super::api::proxy::iss_position,
    ),
    components(
        schemas(
            StatusResponse,
            Snapshot,
            Reading,
            DisplayPanel,
            PanelField,
            MapFrame,
            Marker,
            Transition,
            ErrorResponse,
        )
    ),
    info(
        title = "ISS Tracker API",
        description = "Current position of the International Space Station",
        version = "0.1.0"
    ),
    tags(
        (name = "tracker", description = "Polled reading and manual refresh"),
        (name = "proxy", description = "Upstream pass-through")
    )
)]
pub struct ApiDoc;
