//! Chart presentation glue

pub mod adapters;

pub use adapters::{
    counter_label, gauge_fill_ratio, heat_cell_step, percent_of_track, radar_vertices,
    reduction_percent, stroke_dashoffset, timeline_revealed, track_cells,
};
