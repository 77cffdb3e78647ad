pub mod app;
pub mod charts;
pub mod dashboard;
pub mod event;
pub mod input;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
pub use themes::{available_themes, load_theme};
