#![forbid(unsafe_code)]

pub mod builtin;
pub mod model;
pub mod time;

pub use time::Clock;
