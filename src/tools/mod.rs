mod capture_date;
mod exiftool_scanner;
mod file_compare;
mod name_resolver;
mod path_validator;
pub mod tag_set;

pub use capture_date::{CaptureTimestamp, DateExtractor, SYNTHESIZED_SUBSECOND};
pub use exiftool_scanner::{ExifToolScanner, MetadataSource, parse_exiftool_output};
pub use file_compare::files_identical;
pub use name_resolver::{DEFAULT_SUFFIX_LIMIT, NameResolver, Resolution, sanitize_model};
pub use path_validator::{display_relative, validate_directory_exists};
pub use tag_set::{TagSet, UNKNOWN_MODEL};
