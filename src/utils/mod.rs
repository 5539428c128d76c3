pub mod cookie;
pub mod period;
