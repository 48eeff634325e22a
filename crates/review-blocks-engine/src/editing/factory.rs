use crate::editing::children::expected_shape;
use crate::editing::order::{BLOCK_ORDER_BASE, renumber};
use crate::models::{
    Block, BlockId, BlockKind, BlockType, CHILD_ORDER_BASE, ChildContent, ChildItem,
    ChildList, ChildShape, CustomField, IngredientDetail, ListStyle, ProductRatings,
};

/// Source of fresh identifiers for blocks and child items
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Predictable `prefix-N` ids, for tests and fixtures
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

pub const STARTER_HIGHLIGHTS: [&str; 3] = [
    "Clinically studied ingredients",
    "Third-party tested for purity",
    "No artificial fillers",
];

/// Builds new blocks and child items with variant-appropriate defaults.
///
/// The only state is the injected [`IdSource`]; the same tag always yields the
/// same structure apart from identifiers.
pub struct BlockFactory {
    ids: Box<dyn IdSource>,
}

impl std::fmt::Debug for BlockFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockFactory").finish_non_exhaustive()
    }
}

impl Default for BlockFactory {
    fn default() -> Self {
        Self::new(UuidIds)
    }
}

impl BlockFactory {
    pub fn new(ids: impl IdSource + 'static) -> Self {
        Self { ids: Box::new(ids) }
    }

    /// A new block of the given type with default attributes.
    ///
    /// `order` is left at 0; the store assigns the real position on insert.
    pub fn create(&mut self, block_type: BlockType) -> Block {
        let id = self.ids.next_id();
        let kind = self.default_kind(block_type, &id);
        Block {
            id,
            order: BLOCK_ORDER_BASE,
            article_id: None,
            content: String::new(),
            kind,
        }
    }

    /// A new block with the given text already filled in
    pub fn create_with_content(&mut self, block_type: BlockType, content: &str) -> Block {
        let mut block = self.create(block_type);
        block.content = content.to_string();
        block
    }

    /// Default attributes of `block_type`; child items are owned by `block_id`
    pub fn default_kind(&mut self, block_type: BlockType, block_id: &BlockId) -> BlockKind {
        match block_type {
            BlockType::Heading => BlockKind::Heading { level: 2 },
            BlockType::Paragraph => BlockKind::Paragraph,
            BlockType::Image => BlockKind::Image {
                url: String::new(),
                alt: String::new(),
                caption: String::new(),
            },
            BlockType::Quote => BlockKind::Quote { citation: None },
            BlockType::List => BlockKind::List {
                style: ListStyle::Unordered,
            },
            BlockType::Code => BlockKind::Code {
                language: "plaintext".to_string(),
            },
            BlockType::Html => BlockKind::Html,
            BlockType::Divider => BlockKind::Divider,
            BlockType::Cta => BlockKind::Cta {
                button_text: "Learn more".to_string(),
                button_url: "#".to_string(),
                background_color: None,
            },
            BlockType::Rating => BlockKind::Rating {
                product_name: String::new(),
                ratings: ProductRatings::default(),
                highlights: self.child_items(
                    block_id,
                    STARTER_HIGHLIGHTS.iter().map(|text| ChildContent::text(*text)),
                ),
                custom_fields: Vec::new(),
            },
            BlockType::ProsCons => BlockKind::ProsCons {
                pros: self.child_items(block_id, [ChildContent::text("")]),
                cons: self.child_items(block_id, [ChildContent::text("")]),
                ingredients: Vec::new(),
            },
            BlockType::Ingredients => BlockKind::Ingredients {
                product_name: String::new(),
                introduction: String::new(),
                ingredients: self.child_items(
                    block_id,
                    [ChildContent::Ingredient(IngredientDetail {
                        name: "New ingredient".to_string(),
                        ..IngredientDetail::default()
                    })],
                ),
            },
        }
    }

    /// A single child item with a fresh id; `order` is assigned by the caller
    pub fn new_child(&mut self, block_id: &BlockId, content: ChildContent) -> ChildItem {
        ChildItem {
            id: self.ids.next_id(),
            block_id: block_id.clone(),
            order: CHILD_ORDER_BASE,
            content,
        }
    }

    /// Default content for a new item in `list` of a `block_type` block
    pub fn default_child_content(block_type: BlockType, list: ChildList) -> Option<ChildContent> {
        let content = match expected_shape(block_type, list)? {
            ChildShape::Text => ChildContent::text(""),
            ChildShape::Field => ChildContent::Field(CustomField::default()),
            ChildShape::Ingredient => ChildContent::Ingredient(IngredientDetail {
                name: "New ingredient".to_string(),
                ..IngredientDetail::default()
            }),
        };
        Some(content)
    }

    fn child_items(
        &mut self,
        block_id: &BlockId,
        contents: impl IntoIterator<Item = ChildContent>,
    ) -> Vec<ChildItem> {
        let mut items: Vec<ChildItem> = contents
            .into_iter()
            .map(|content| self.new_child(block_id, content))
            .collect();
        renumber(&mut items, CHILD_ORDER_BASE);
        items
    }
}
