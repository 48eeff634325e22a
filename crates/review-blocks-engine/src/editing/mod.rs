/*!
 * # Editing Core Module
 *
 * Structured editing of an article's ordered block sequence.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the Block Document
 * - The block sequence lives in one **`BlockDocument`** owned by the editing session
 * - The sequence is only ever assigned in one place (`BlockDocument::replace`)
 * - Every assignment renumbers `order` so it always equals the array index
 *
 * ### 2. Command-Based Editing
 * - All edits are represented as **Commands** (`Cmd` enum)
 * - A pure reducer turns `(blocks, cmd)` into the next sequence
 * - Edits that target a block or child that no longer exists are reported as
 *   no-ops in the returned `Patch`, never as errors
 *
 * ### 3. Defaults and Child Lists
 * - The **`BlockFactory`** builds each variant with in-bounds defaults
 * - Child lists (pros, cons, highlights, ingredients, custom fields) are
 *   ordered from 1 and renumbered on every add, remove and move
 *
 * ### 4. Decisions Stay With the Caller
 * - The paste sniffer only proposes a block; the session returns a
 *   `PendingPaste` that the caller resolves
 * - Drag gestures are tracked by the `DragController` and commit a single
 *   move on drop
 *
 * ## Module Structure
 *
 * - **`document`**: `BlockDocument`, the store and its version counter
 * - **`commands`**: `Cmd`, `BlockPatch` and the reducer
 * - **`order`**: renumbering shared by blocks and child lists
 * - **`factory`**: id sources and per-variant defaults
 * - **`children`**: child-list editing with shape checks
 * - **`drag`**: pointer-drag state machine
 * - **`sniff`**: paste classification
 * - **`generation`**: per-block busy flags for text generation
 * - **`session`**: `Editor`, tying the above to policy and persistence
 * - **`patch`**: edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use review_blocks_engine::editing::*;
 * use review_blocks_engine::models::BlockType;
 *
 * let factory = BlockFactory::new(SequentialIds::new("b"));
 * let mut editor = Editor::new(EditorPolicy::default(), factory);
 *
 * let heading = editor.add_block(BlockType::Heading, -1).unwrap();
 * let intro = editor.add_block(BlockType::Paragraph, -1).unwrap();
 * editor.update_block(&intro, BlockPatch::content("Why magnesium matters"));
 *
 * editor.move_block(&intro, 0);
 * assert_eq!(editor.document().index_of(&heading), Some(1));
 * ```
 */

pub mod children;
pub mod commands;
pub mod document;
pub mod drag;
pub mod factory;
pub mod generation;
pub mod order;
pub mod patch;
pub mod session;
pub mod sniff;

// Public API re-exports
pub use commands::{BlockPatch, Cmd, NoOpReason, Reduction, reduce};
pub use document::BlockDocument;
pub use drag::{DragController, DragEnd, DragState, ReorderTarget};
pub use factory::{BlockFactory, IdSource, STARTER_HIGHLIGHTS, SequentialIds, UuidIds};
pub use generation::{
    ContentGenerator, GenerationError, GenerationRequest, GenerationTicket, GenerationTracker,
};
pub use order::{BLOCK_ORDER_BASE, Ordered, is_contiguous, renumber};
pub use patch::{Outcome, Patch};
pub use session::{
    Bootstrap, Editor, EditorPolicy, PasteDecision, PasteOutcome, PendingPaste, Refusal, Removal,
    SessionError,
};
pub use sniff::{Proposal, ProposalDetail, sniff};

use crate::models::{BlockId, BlockType, ChildList, ChildShape};

/// Edits the document model rejects outright
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Invalid insertion index {0}; use -1 to append")]
    InvalidIndex(isize),
    #[error("A {block_type} block has no {list} list")]
    NoSuchChildList {
        block_type: BlockType,
        list: ChildList,
    },
    #[error("The {list} list holds {expected} items, not {found}")]
    ChildShapeMismatch {
        list: ChildList,
        expected: ChildShape,
        found: ChildShape,
    },
    #[error("Content generation already running for block {0}")]
    GenerationInProgress(BlockId),
}
