mod bars;
mod chrome;
mod comparison;
mod gauges;
mod heatmap;
mod hero;
mod popup;
mod radar;
mod status_bar;
mod timeline;

pub use bars::ScoreBars;
pub use chrome::{breadcrumb_line, Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
pub use comparison::BeforeAfter;
pub use gauges::{arc_points, GaugeRow};
pub use heatmap::RiskHeatmap;
pub use hero::{particle_cell, HeroBanner};
pub use popup::{centered_rect, PopupWidget, HELP_BINDINGS};
pub use radar::{polygon_edges, MaturityRadar};
pub use status_bar::StatusBarWidget;
pub use timeline::IncidentTimeline;
