pub mod classification;
pub mod metadata;

pub use classification::FileClassification;
pub use metadata::{NameParts, SeriesMetadata};
