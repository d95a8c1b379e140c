#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod summary;
pub mod time;
pub mod view;

pub use error::PageError;
pub use time::Clock;
