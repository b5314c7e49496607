pub mod chart_service;
pub mod render_service;
pub mod series_service;
