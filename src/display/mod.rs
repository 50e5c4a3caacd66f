pub mod map;
pub mod panel;

pub use map::{MapFrame, MapView, Transition};
pub use panel::{DisplayPanel, PanelField};
