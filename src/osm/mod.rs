pub mod parser;

pub use parser::{RawFeature, parse_features, parse_holes};
