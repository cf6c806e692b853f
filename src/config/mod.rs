mod settings;

pub use settings::{LoggingSettings, PositionSettings, Settings};
