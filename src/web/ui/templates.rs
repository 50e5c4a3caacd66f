use askama::Template;
use askama_web::WebTemplate;

use crate::display::DisplayPanel;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub panel: DisplayPanel,
    pub loading: bool,
    pub error: Option<String>,
    pub poll_interval_ms: u64,
    pub tile_url: String,
    pub attribution: String,
}
