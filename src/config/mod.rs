pub mod settings;

pub use settings::{LinearSettings, ServerSettings, Settings};
