//! Core data types.

pub mod file;
pub mod response;
pub mod schema;
pub mod usage;

pub use file::*;
pub use response::*;
pub use schema::*;
pub use usage::*;
