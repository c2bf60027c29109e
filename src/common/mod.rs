#[macro_use]
pub mod logging;
pub mod report;
pub mod setup;

pub use setup::{CommandLineOptions, Mode};
