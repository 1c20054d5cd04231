pub mod data;
pub mod elementwise;
pub mod environment;
mod error;
pub mod logging;
pub mod noise;
pub mod wrapper;

pub use error::{Error, Result};
