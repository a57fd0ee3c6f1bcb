//! egui widgets: selection side panel, top bar and the chart itself.

pub mod panels;
pub mod plot;
