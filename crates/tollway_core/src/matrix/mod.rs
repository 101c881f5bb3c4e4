pub mod distance_matrix;
pub mod location_id;
pub mod segment;
pub mod threshold;
pub mod unroll;
