pub mod chart;
pub mod config;
pub mod stats;

pub use chart::ChartKind;
pub use config::Config;
pub use config::theme::Theme;
pub use stats::SeriesStats;
