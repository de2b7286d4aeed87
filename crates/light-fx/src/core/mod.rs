pub mod delay;
pub mod time;
