use crate::models::{Block, ChildItem};

/// Blocks are numbered from 0
pub const BLOCK_ORDER_BASE: usize = 0;

/// Anything carrying a positional `order` field
pub trait Ordered {
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

impl Ordered for Block {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Ordered for ChildItem {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// Assign `order = base + position` to every item in one pass
pub fn renumber<T: Ordered>(items: &mut [T], base: usize) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_order(base + position);
    }
}

/// Whether `order` already equals `base + position` for every item
pub fn is_contiguous<T: Ordered>(items: &[T], base: usize) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(position, item)| item.order() == base + position)
}

/// Move the element at `from` so it ends up at index `to`.
///
/// `to` is clamped to the last index. Returns false when nothing moved.
pub fn relocate<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if items.is_empty() || from >= items.len() {
        return false;
    }
    let to = to.min(items.len() - 1);
    if from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
