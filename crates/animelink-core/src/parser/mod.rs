pub mod classifier;
pub mod name;
pub mod patterns;

pub use classifier::{Classifier, DEFAULT_SEASON};
pub use name::NameParser;
pub use patterns::{PatternLibrary, SUBTITLE_EXTENSIONS};
