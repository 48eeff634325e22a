use crate::editing::children::normalize_children;
use crate::editing::commands::{BlockPatch, Cmd, NoOpReason, Reduction, reduce};
use crate::editing::order::{BLOCK_ORDER_BASE, renumber};
use crate::editing::{EditError, Outcome, Patch};
use crate::models::{Block, BlockId};

/// The canonical ordered block sequence of one editing session.
///
/// `BlockDocument` is the Block Store: every higher-level edit is a [`Cmd`]
/// that is reduced to a new sequence and then handed to [`BlockDocument::replace`],
/// the only place the sequence is assigned. `replace` always renumbers, so
/// `order == index` holds whenever the document is observable.
///
/// ```rust
/// # use review_blocks_engine::editing::{BlockDocument, BlockFactory, SequentialIds};
/// # use review_blocks_engine::models::BlockType;
/// let mut factory = BlockFactory::new(SequentialIds::new("blk"));
/// let mut doc = BlockDocument::new();
///
/// doc.insert(factory.create(BlockType::Heading), -1).unwrap();
/// doc.insert(factory.create(BlockType::Paragraph), 0).unwrap();
///
/// assert_eq!(doc.blocks()[0].order, 0);
/// assert_eq!(doc.blocks()[1].order, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockDocument {
    blocks: Vec<Block>,
    /// Incremented on every applied change (enables change detection)
    version: u64,
}

impl BlockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from persisted blocks. Blocks are stable-sorted by their stored
    /// `order` before renumbering, so gaps or duplicates from the backend heal.
    /// Child lists are normalized the same way.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(|block| block.order);
        renumber(&mut blocks, BLOCK_ORDER_BASE);
        blocks.iter_mut().for_each(normalize_children);
        Self { blocks, version: 0 }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        crate::editing::commands::position(&self.blocks, id)
    }

    /// Replace the whole sequence in one assignment
    pub fn replace(&mut self, mut blocks: Vec<Block>) {
        renumber(&mut blocks, BLOCK_ORDER_BASE);
        self.blocks = blocks;
        self.version += 1;
    }

    /// Reduce `cmd` against the current sequence and commit the result
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        match reduce(&self.blocks, &cmd)? {
            Reduction::Changed(blocks) => {
                self.replace(blocks);
                log::debug!("applied {} (version {})", describe(&cmd), self.version);
                Ok(Patch {
                    outcome: Outcome::Applied,
                    version: self.version,
                })
            }
            Reduction::Unchanged(reason) => {
                if reason == NoOpReason::StaleReference {
                    log::debug!(
                        "ignored {} against stale block {:?}",
                        describe(&cmd),
                        cmd.target()
                    );
                }
                Ok(Patch {
                    outcome: Outcome::NoOp(reason),
                    version: self.version,
                })
            }
        }
    }

    pub fn insert(&mut self, block: Block, at: isize) -> Result<Patch, EditError> {
        self.apply(Cmd::InsertBlock { block, at })
    }

    pub fn remove(&mut self, id: &BlockId) -> Patch {
        self.apply_infallible(Cmd::RemoveBlock { id: id.clone() })
    }

    pub fn move_block(&mut self, id: &BlockId, to: usize) -> Patch {
        self.apply_infallible(Cmd::MoveBlock { id: id.clone(), to })
    }

    pub fn update(&mut self, id: &BlockId, patch: BlockPatch) -> Patch {
        self.apply_infallible(Cmd::UpdateBlock {
            id: id.clone(),
            patch,
        })
    }

    fn apply_infallible(&mut self, cmd: Cmd) -> Patch {
        match self.apply(cmd) {
            Ok(patch) => patch,
            // Block-level remove/move/update never produce an error
            Err(_) => Patch {
                outcome: Outcome::NoOp(NoOpReason::StaleReference),
                version: self.version,
            },
        }
    }
}

fn describe(cmd: &Cmd) -> &'static str {
    match cmd {
        Cmd::InsertBlock { .. } => "insert",
        Cmd::RemoveBlock { .. } => "remove",
        Cmd::MoveBlock { .. } => "move",
        Cmd::UpdateBlock { .. } => "update",
        Cmd::ConvertBlock { .. } => "convert",
        Cmd::AddChild { .. } => "add-child",
        Cmd::UpdateChild { .. } => "update-child",
        Cmd::RemoveChild { .. } => "remove-child",
        Cmd::MoveChild { .. } => "move-child",
    }
}
