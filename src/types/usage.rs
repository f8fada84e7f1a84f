//! Token usage accounting.

use serde::{Deserialize, Serialize};

/// Usage statistics reported by the remote service for one call.
///
/// `total_tokens` is copied from the service as-is; it is not recomputed from
/// the other two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Usage {
    /// Input tokens (`prompt_tokens` on the wire)
    pub input_tokens: u32,
    /// Output tokens (`completion_tokens` on the wire)
    pub output_tokens: u32,
    /// Total tokens as reported
    pub total_tokens: u32,
}

impl Usage {
    pub const fn new(input_tokens: u32, output_tokens: u32, total_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "input={} output={} total={}",
            self.input_tokens, self.output_tokens, self.total_tokens
        )
    }
}
