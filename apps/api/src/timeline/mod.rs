// Timeline: milestone CRUD plus the pure analytics layer (gap detection,
// skill frequency, histograms).

pub mod analytics;
pub mod handlers;
