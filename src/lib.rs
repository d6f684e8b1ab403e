pub mod chart;
pub mod frame;
pub mod logger;
pub mod surface;

pub use chart::Chart;
pub use frame::Frame;
