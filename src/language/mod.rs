//! Language classification: filename and content detection, label
//! normalization and the language filter used by search.

pub mod detection;
pub mod extension;
pub mod normalize;

pub use detection::{detect_language, DEFAULT_LANGUAGE};
pub use extension::file_extension;
pub use normalize::{is_post_matching_language, normalize_language_name};
