use crate::editing::EditError;
use crate::editing::order::{relocate, renumber};
use crate::models::{
    Block, BlockType, CHILD_ORDER_BASE, ChildContent, ChildId, ChildItem, ChildList, ChildShape,
};

/// Content shape accepted by `list` inside a `block_type` block, or `None`
/// when that variant has no such list
pub fn expected_shape(block_type: BlockType, list: ChildList) -> Option<ChildShape> {
    match (block_type, list) {
        (BlockType::Rating, ChildList::Highlights) => Some(ChildShape::Text),
        (BlockType::Rating, ChildList::CustomFields) => Some(ChildShape::Field),
        (BlockType::ProsCons, ChildList::Pros | ChildList::Cons | ChildList::Ingredients) => {
            Some(ChildShape::Text)
        }
        (BlockType::Ingredients, ChildList::Ingredients) => Some(ChildShape::Ingredient),
        _ => None,
    }
}

/// Lists owned by a block variant, in display order
pub fn lists_of(block_type: BlockType) -> &'static [ChildList] {
    match block_type {
        BlockType::Rating => &[ChildList::Highlights, ChildList::CustomFields],
        BlockType::ProsCons => &[ChildList::Pros, ChildList::Cons, ChildList::Ingredients],
        BlockType::Ingredients => &[ChildList::Ingredients],
        _ => &[],
    }
}

fn checked_list<'a>(
    block: &'a mut Block,
    list: ChildList,
    content: Option<&ChildContent>,
) -> Result<&'a mut Vec<ChildItem>, EditError> {
    let block_type = block.block_type();
    let expected = expected_shape(block_type, list)
        .ok_or(EditError::NoSuchChildList { block_type, list })?;
    if let Some(content) = content
        && content.shape() != expected
    {
        return Err(EditError::ChildShapeMismatch {
            list,
            expected,
            found: content.shape(),
        });
    }
    block
        .child_list_mut(list)
        .ok_or(EditError::NoSuchChildList { block_type, list })
}

/// Sort every child list of `block` by stored order, renumber it from
/// [`CHILD_ORDER_BASE`] and bind each item to `block`
pub fn normalize_children(block: &mut Block) {
    let block_id = block.id.clone();
    for &list in lists_of(block.block_type()) {
        if let Some(items) = block.child_list_mut(list) {
            items.sort_by_key(|item| item.order);
            renumber(items, CHILD_ORDER_BASE);
            for item in items.iter_mut() {
                item.block_id.clone_from(&block_id);
            }
        }
    }
}

/// Append `item` at the end of `list`; it takes the next position in that list
pub fn add_child(block: &mut Block, list: ChildList, mut item: ChildItem) -> Result<(), EditError> {
    let block_id = block.id.clone();
    let items = checked_list(block, list, Some(&item.content))?;
    item.block_id = block_id;
    item.order = CHILD_ORDER_BASE + items.len();
    items.push(item);
    Ok(())
}

/// Replace the content of one child. Returns false when the child is gone.
pub fn update_child(
    block: &mut Block,
    list: ChildList,
    child_id: &ChildId,
    content: ChildContent,
) -> Result<bool, EditError> {
    let items = checked_list(block, list, Some(&content))?;
    match items.iter_mut().find(|item| &item.id == child_id) {
        Some(item) => {
            item.content = content;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Remove one child and renumber the rest. Returns false when the child is gone.
pub fn remove_child(
    block: &mut Block,
    list: ChildList,
    child_id: &ChildId,
) -> Result<bool, EditError> {
    let items = checked_list(block, list, None)?;
    let before = items.len();
    items.retain(|item| &item.id != child_id);
    if items.len() == before {
        return Ok(false);
    }
    renumber(items, CHILD_ORDER_BASE);
    Ok(true)
}

/// Move one child to index `to` (0-based, clamped) within its list
pub fn move_child(
    block: &mut Block,
    list: ChildList,
    child_id: &ChildId,
    to: usize,
) -> Result<bool, EditError> {
    let items = checked_list(block, list, None)?;
    let Some(from) = items.iter().position(|item| &item.id == child_id) else {
        return Ok(false);
    };
    if !relocate(items, from, to) {
        return Ok(false);
    }
    renumber(items, CHILD_ORDER_BASE);
    Ok(true)
}
