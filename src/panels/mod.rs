mod central_panel;
mod controls_panel;
pub mod properties;

pub use central_panel::central_panel;
pub use controls_panel::controls_panel;
pub use properties::{PanelState, PropertyEdit, apply_edit};
