use crate::editing::{BlockDocument, Patch};
use crate::models::BlockId;

/// Something a completed drag gesture can reorder
pub trait ReorderTarget {
    fn move_block(&mut self, id: &BlockId, to: usize) -> Patch;
}

impl ReorderTarget for BlockDocument {
    fn move_block(&mut self, id: &BlockId, to: usize) -> Patch {
        BlockDocument::move_block(self, id, to)
    }
}

/// Pointer-drag state. The document is never touched while dragging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        block: BlockId,
    },
    Hovering {
        block: BlockId,
        index: usize,
    },
}

/// How a gesture finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEnd {
    Dropped {
        block: BlockId,
        to: usize,
        patch: Patch,
    },
    Cancelled,
}

/// Translates pointer-drag gestures into a single `move_block` call.
///
/// `Idle → Dragging → Hovering* → drop → Idle`, or `→ cancel → Idle`.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Block being dragged, for marking it in a view
    pub fn dragged(&self) -> Option<&BlockId> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { block } | DragState::Hovering { block, .. } => Some(block),
        }
    }

    pub fn hovered_index(&self) -> Option<usize> {
        match &self.state {
            DragState::Hovering { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Start dragging `block`; a gesture already in progress is abandoned
    pub fn begin(&mut self, block: BlockId) {
        if self.state != DragState::Idle {
            log::debug!("drag restarted before the previous gesture ended");
        }
        self.state = DragState::Dragging { block };
    }

    /// Pointer is over drop slot `index`. Ignored when not dragging.
    pub fn hover(&mut self, index: usize) {
        self.state = match std::mem::take(&mut self.state) {
            DragState::Idle => DragState::Idle,
            DragState::Dragging { block } | DragState::Hovering { block, .. } => {
                DragState::Hovering { block, index }
            }
        };
    }

    /// Drop at `index`, moving the dragged block exactly once
    pub fn drop_at<T: ReorderTarget + ?Sized>(&mut self, target: &mut T, index: usize) -> DragEnd {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragEnd::Cancelled,
            DragState::Dragging { block } | DragState::Hovering { block, .. } => {
                let patch = target.move_block(&block, index);
                DragEnd::Dropped {
                    block,
                    to: index,
                    patch,
                }
            }
        }
    }

    /// Drop at the last hovered slot; without one the gesture is cancelled
    pub fn drop_on_hovered<T: ReorderTarget + ?Sized>(&mut self, target: &mut T) -> DragEnd {
        match self.hovered_index() {
            Some(index) => self.drop_at(target, index),
            None => self.cancel(),
        }
    }

    /// The gesture ended outside any drop target
    pub fn cancel(&mut self) -> DragEnd {
        self.state = DragState::Idle;
        DragEnd::Cancelled
    }
}
