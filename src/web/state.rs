use std::sync::Arc;

use crate::tracker::Tracker;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tracker: Tracker,
}
