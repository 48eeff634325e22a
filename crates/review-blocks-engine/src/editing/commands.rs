use crate::editing::EditError;
use crate::editing::children;
use crate::editing::order::{BLOCK_ORDER_BASE, relocate, renumber};
use crate::models::{
    Block, BlockId, BlockKind, ChildContent, ChildId, ChildItem, ChildList, ListStyle,
    ProductRatings, clamp_heading_level,
};

/// Operations that can be applied to a block document
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Insert at `at`; `-1` appends, anything past the end clamps
    InsertBlock {
        block: Block,
        at: isize,
    },
    RemoveBlock {
        id: BlockId,
    },
    MoveBlock {
        id: BlockId,
        to: usize,
    },
    UpdateBlock {
        id: BlockId,
        patch: BlockPatch,
    },
    /// Switch the block to the variant of `kind`, which carries that variant's defaults
    ConvertBlock {
        id: BlockId,
        kind: BlockKind,
    },
    AddChild {
        block_id: BlockId,
        list: ChildList,
        item: ChildItem,
    },
    UpdateChild {
        block_id: BlockId,
        list: ChildList,
        child_id: ChildId,
        content: ChildContent,
    },
    RemoveChild {
        block_id: BlockId,
        list: ChildList,
        child_id: ChildId,
    },
    MoveChild {
        block_id: BlockId,
        list: ChildList,
        child_id: ChildId,
        to: usize,
    },
}

impl Cmd {
    /// Block the command targets, if it targets an existing one
    pub fn target(&self) -> Option<&BlockId> {
        match self {
            Cmd::InsertBlock { .. } => None,
            Cmd::RemoveBlock { id }
            | Cmd::MoveBlock { id, .. }
            | Cmd::UpdateBlock { id, .. }
            | Cmd::ConvertBlock { id, .. } => Some(id),
            Cmd::AddChild { block_id, .. }
            | Cmd::UpdateChild { block_id, .. }
            | Cmd::RemoveChild { block_id, .. }
            | Cmd::MoveChild { block_id, .. } => Some(block_id),
        }
    }
}

/// Partial field update for a block.
///
/// Fields that do not apply to the block's variant are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub content: Option<String>,
    pub level: Option<u8>,
    pub list_style: Option<ListStyle>,
    pub language: Option<String>,
    pub url: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub citation: Option<Option<String>>,
    pub button_text: Option<String>,
    pub button_url: Option<String>,
    pub background_color: Option<Option<String>>,
    pub product_name: Option<String>,
    pub introduction: Option<String>,
    pub ratings: Option<ProductRatings>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_ratings(mut self, ratings: ProductRatings) -> Self {
        self.ratings = Some(ratings);
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Merge into `block`; out-of-range values are clamped
    pub fn merge_into(&self, block: &mut Block) {
        if let Some(content) = &self.content {
            block.content = content.clone();
        }
        match &mut block.kind {
            BlockKind::Heading { level } => {
                if let Some(new_level) = self.level {
                    *level = clamp_heading_level(new_level);
                }
            }
            BlockKind::List { style } => {
                if let Some(new_style) = self.list_style {
                    *style = new_style;
                }
            }
            BlockKind::Code { language } => set(language, &self.language),
            BlockKind::Image { url, alt, caption } => {
                set(url, &self.url);
                set(alt, &self.alt);
                set(caption, &self.caption);
            }
            BlockKind::Quote { citation } => set(citation, &self.citation),
            BlockKind::Cta {
                button_text,
                button_url,
                background_color,
            } => {
                set(button_text, &self.button_text);
                set(button_url, &self.button_url);
                set(background_color, &self.background_color);
            }
            BlockKind::Rating {
                product_name,
                ratings,
                ..
            } => {
                set(product_name, &self.product_name);
                if let Some(new_ratings) = self.ratings {
                    *ratings = new_ratings.clamped();
                }
            }
            BlockKind::Ingredients {
                product_name,
                introduction,
                ..
            } => {
                set(product_name, &self.product_name);
                set(introduction, &self.introduction);
            }
            BlockKind::Paragraph
            | BlockKind::Html
            | BlockKind::Divider
            | BlockKind::ProsCons { .. } => {}
        }
    }
}

fn set<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

/// Why a command left the document untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// The targeted block or child no longer exists
    StaleReference,
    /// The block or child is already at the requested position
    SamePosition,
    /// The block already has the requested variant
    SameType,
}

/// Result of reducing a command against a block sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    Changed(Vec<Block>),
    Unchanged(NoOpReason),
}

/// Pure transition `(blocks, cmd) -> blocks`.
///
/// The returned sequence is already renumbered. Stale references are reported
/// as [`Reduction::Unchanged`], never as errors.
pub fn reduce(blocks: &[Block], cmd: &Cmd) -> Result<Reduction, EditError> {
    let mut next = blocks.to_vec();

    match cmd {
        Cmd::InsertBlock { block, at } => {
            let index = insertion_index(*at, next.len())?;
            next.insert(index, block.clone());
        }
        Cmd::RemoveBlock { id } => {
            let Some(index) = position(&next, id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            next.remove(index);
        }
        Cmd::MoveBlock { id, to } => {
            let Some(from) = position(&next, id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            if !relocate(&mut next, from, *to) {
                return Ok(Reduction::Unchanged(NoOpReason::SamePosition));
            }
        }
        Cmd::UpdateBlock { id, patch } => {
            let Some(block) = find_mut(&mut next, id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            patch.merge_into(block);
        }
        Cmd::ConvertBlock { id, kind } => {
            let Some(block) = find_mut(&mut next, id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            if block.block_type() == kind.block_type() {
                return Ok(Reduction::Unchanged(NoOpReason::SameType));
            }
            block.kind = converted_kind(&block.kind, kind.clone());
            children::normalize_children(block);
        }
        Cmd::AddChild {
            block_id,
            list,
            item,
        } => {
            let Some(block) = find_mut(&mut next, block_id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            children::add_child(block, *list, item.clone())?;
        }
        Cmd::UpdateChild {
            block_id,
            list,
            child_id,
            content,
        } => {
            let Some(block) = find_mut(&mut next, block_id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            if !children::update_child(block, *list, child_id, content.clone())? {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            }
        }
        Cmd::RemoveChild {
            block_id,
            list,
            child_id,
        } => {
            let Some(block) = find_mut(&mut next, block_id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            if !children::remove_child(block, *list, child_id)? {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            }
        }
        Cmd::MoveChild {
            block_id,
            list,
            child_id,
            to,
        } => {
            let Some(block) = find_mut(&mut next, block_id) else {
                return Ok(Reduction::Unchanged(NoOpReason::StaleReference));
            };
            let exists = block
                .child_list(*list)
                .is_some_and(|items| items.iter().any(|item| &item.id == child_id));
            if !children::move_child(block, *list, child_id, *to)? {
                let reason = if exists {
                    NoOpReason::SamePosition
                } else {
                    NoOpReason::StaleReference
                };
                return Ok(Reduction::Unchanged(reason));
            }
        }
    }

    renumber(&mut next, BLOCK_ORDER_BASE);
    Ok(Reduction::Changed(next))
}

/// Resolve an insertion index: `-1` appends, indices past the end clamp
pub fn insertion_index(at: isize, len: usize) -> Result<usize, EditError> {
    match at {
        -1 => Ok(len),
        at if at < -1 => Err(EditError::InvalidIndex(at)),
        at => Ok((at as usize).min(len)),
    }
}

pub(crate) fn position(blocks: &[Block], id: &BlockId) -> Option<usize> {
    blocks.iter().position(|block| &block.id == id)
}

fn find_mut<'a>(blocks: &'a mut [Block], id: &BlockId) -> Option<&'a mut Block> {
    blocks.iter_mut().find(|block| &block.id == id)
}

/// New variant attributes for a conversion: the target's defaults, clamped,
/// keeping the product name when both variants carry one
fn converted_kind(previous: &BlockKind, target: BlockKind) -> BlockKind {
    let carried_name = previous.product_name().map(str::to_string);
    match target {
        BlockKind::Heading { level } => BlockKind::Heading {
            level: clamp_heading_level(level),
        },
        BlockKind::Rating {
            product_name,
            ratings,
            highlights,
            custom_fields,
        } => BlockKind::Rating {
            product_name: carried_name.unwrap_or(product_name),
            ratings: ratings.clamped(),
            highlights,
            custom_fields,
        },
        BlockKind::Ingredients {
            product_name,
            introduction,
            ingredients,
        } => BlockKind::Ingredients {
            product_name: carried_name.unwrap_or(product_name),
            introduction,
            ingredients,
        },
        other => other,
    }
}
