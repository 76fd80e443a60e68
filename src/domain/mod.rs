pub mod feature;
pub mod hole;

pub use feature::{Feature, FeatureKind, FeatureSet};
pub use hole::{GeoPoint, Hole};
