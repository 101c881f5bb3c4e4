pub mod schedule;
pub mod time_based;
pub mod toll_rate;
pub mod vehicle;
pub mod weekday;
