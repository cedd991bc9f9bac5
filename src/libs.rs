pub mod seq;
pub mod code;
pub mod score;
pub mod mutation;
pub mod ostrov;
pub mod io;
pub mod error;
pub mod logging;
pub mod utils;

pub mod constants;

pub use crate::error::{Error, Result};
