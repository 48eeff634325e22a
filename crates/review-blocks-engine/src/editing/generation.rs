use std::collections::HashSet;

use crate::models::{BlockId, BlockType};

/// What a text generator is asked for
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub block_id: BlockId,
    pub block_type: BlockType,
    pub prompt: String,
    /// Block content at the time the request was made
    pub current_content: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("Content generation failed: {0}")]
    Failed(String),
    #[error("Generator returned no text")]
    Empty,
}

/// External text generator; treated as opaque
pub trait ContentGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Proof that a generation for `block_id` was started and not yet finished
#[derive(Debug, PartialEq, Eq)]
pub struct GenerationTicket {
    pub(crate) block_id: BlockId,
}

impl GenerationTicket {
    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }
}

/// Per-block busy flags: one outstanding generation per block, any number
/// across different blocks
#[derive(Debug, Default)]
pub struct GenerationTracker {
    busy: HashSet<BlockId>,
}

impl GenerationTracker {
    pub fn is_busy(&self, block_id: &BlockId) -> bool {
        self.busy.contains(block_id)
    }

    pub fn busy_count(&self) -> usize {
        self.busy.len()
    }

    /// Mark `block_id` busy; `None` if it already is
    pub fn begin(&mut self, block_id: &BlockId) -> Option<GenerationTicket> {
        if !self.busy.insert(block_id.clone()) {
            return None;
        }
        Some(GenerationTicket {
            block_id: block_id.clone(),
        })
    }

    /// Clear the busy flag held by `ticket`
    pub fn finish(&mut self, ticket: &GenerationTicket) {
        self.busy.remove(&ticket.block_id);
    }
}
