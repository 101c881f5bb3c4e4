pub mod error;
pub mod matrix;
pub mod pipeline;
pub mod pricing;
mod utils;
