pub mod article;
pub mod block;
pub mod child;

pub use article::{Article, FieldError, NEW_ARTICLE_ID, ValidationErrors};
pub use block::{
    Block, BlockId, BlockKind, BlockType, ListStyle, ProductRatings, UnknownBlockType,
    clamp_heading_level, clamp_rating,
};
pub use child::{
    CHILD_ORDER_BASE, ChildContent, ChildId, ChildItem, ChildList, ChildShape, CustomField,
    IngredientDetail, UnknownChildList,
};
