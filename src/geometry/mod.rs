pub mod hit_testing;
pub mod shape;

pub use hit_testing::hit_test;
pub use shape::{ClipRegion, Shape, clip_region, point_in_bounds};
