pub mod load;
pub mod types;

pub use types::{
    ArrangeOptions, Config, DEFAULT_EXIFTOOL, DEFAULT_METADATA_DUMP_FILE, SETTINGS_FILE,
    UserSettings,
};
