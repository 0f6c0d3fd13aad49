pub mod error;
pub mod export;
pub mod io;
pub mod layout;
pub mod model;
pub mod rows;

pub use error::{ReportError, Result};
