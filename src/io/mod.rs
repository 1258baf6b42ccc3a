/// Command-line parsing and the generate/export/play runner
pub mod cli;
/// Constants, level configuration, palette and presets
pub mod configuration;
/// Error taxonomy and result alias
pub mod error;
/// PNG export
pub mod image;
/// Progress spinner and log sink
pub mod progress;
/// Text rendering of the grid
pub mod render;
/// Generation trace capture and GIF export
pub mod visualization;
