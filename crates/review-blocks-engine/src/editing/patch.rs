use crate::editing::commands::NoOpReason;

/// What applying a command did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NoOp(NoOpReason),
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub outcome: Outcome,
    /// Document version after the command
    pub version: u64,
}

impl Patch {
    pub fn applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }
}
