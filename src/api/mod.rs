pub mod overpass;

pub use overpass::{Element, GolfSource, OverpassSource, OverpassResponse};
