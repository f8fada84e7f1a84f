//! Utility modules for chatfile
//!
//! This module contains small helpers shared by the encoder and the client.

pub mod mime;

pub use mime::*;
