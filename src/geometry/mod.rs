pub mod bounds;
pub mod line;
pub mod point;
pub mod projection;
pub mod rotation;

pub use bounds::PixelBounds;
pub use line::{circle_segment_intersect, dist_to_line, is_right_of, x_at_y, yards};
pub use point::Pt;
pub use projection::{GeoBounds, Projector};
pub use rotation::{Frame, rotate_about, upright_angle};
