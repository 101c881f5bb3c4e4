pub mod position;
pub mod time;
