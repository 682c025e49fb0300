pub mod config;
pub mod polyline;
pub mod rides;
pub mod routing;
pub mod util;
