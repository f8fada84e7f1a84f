//! Error Handling Module
//!
//! This module provides the error type shared by every stage of a completion call:
//! - Core error type (`LlmError`) and its coarse classification (`ErrorKind`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use chatfile::error::{ErrorKind, LlmError};
//!
//! let error = LlmError::api_error(404, "Not found");
//! assert_eq!(error.kind(), ErrorKind::RemoteCall);
//! assert_eq!(error.status_code(), Some(404));
//! ```

mod conversions;
pub mod types;

pub use types::*;
