#![forbid(unsafe_code)]

pub mod error;
pub mod guess;
pub mod model;
pub mod pools;
pub mod shuffle;
pub mod time;

pub use error::Error;
pub use time::Clock;
