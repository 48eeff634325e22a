use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::block::BlockId;

/// Identifier of a child item within its block
pub type ChildId = String;

/// Child lists are numbered from 1; blocks are numbered from 0
pub const CHILD_ORDER_BASE: usize = 1;

/// A named, ordered sub-element belonging to a block (one pro, one highlight, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildItem {
    pub id: ChildId,
    #[serde(default)]
    pub block_id: BlockId,
    #[serde(default)]
    pub order: usize,
    #[serde(flatten)]
    pub content: ChildContent,
}

/// Payload of a child item. The shape is fixed by the list it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildContent {
    Ingredient(IngredientDetail),
    Field(CustomField),
    Text { content: String },
}

impl ChildContent {
    pub fn text(content: impl Into<String>) -> Self {
        ChildContent::Text {
            content: content.into(),
        }
    }

    pub fn shape(&self) -> ChildShape {
        match self {
            ChildContent::Ingredient(_) => ChildShape::Ingredient,
            ChildContent::Field(_) => ChildShape::Field,
            ChildContent::Text { .. } => ChildShape::Text,
        }
    }

    /// Short human-readable summary, used by list views
    pub fn summary(&self) -> &str {
        match self {
            ChildContent::Ingredient(detail) => &detail.name,
            ChildContent::Field(field) => &field.label,
            ChildContent::Text { content } => content,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDetail {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_year: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub label: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildShape {
    Text,
    Ingredient,
    Field,
}

impl fmt::Display for ChildShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChildShape::Text => "text",
            ChildShape::Ingredient => "ingredient detail",
            ChildShape::Field => "custom field",
        })
    }
}

/// Name of a child collection inside a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildList {
    Pros,
    Cons,
    Ingredients,
    Highlights,
    CustomFields,
}

impl ChildList {
    pub fn as_str(self) -> &'static str {
        match self {
            ChildList::Pros => "pros",
            ChildList::Cons => "cons",
            ChildList::Ingredients => "ingredients",
            ChildList::Highlights => "highlights",
            ChildList::CustomFields => "customFields",
        }
    }
}

impl fmt::Display for ChildList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown child list: {0}")]
pub struct UnknownChildList(pub String);

impl FromStr for ChildList {
    type Err = UnknownChildList;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pros" => Ok(ChildList::Pros),
            "cons" => Ok(ChildList::Cons),
            "ingredients" => Ok(ChildList::Ingredients),
            "highlights" => Ok(ChildList::Highlights),
            "customFields" => Ok(ChildList::CustomFields),
            other => Err(UnknownChildList(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_child_round_trips_through_json() {
        let item = ChildItem {
            id: "h1".to_string(),
            block_id: "b1".to_string(),
            order: 1,
            content: ChildContent::text("Third-party tested"),
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "h1",
                "blockId": "b1",
                "order": 1,
                "content": "Third-party tested"
            })
        );

        let back: ChildItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_ingredient_detail_is_recognised_by_name() {
        let json = r#"{"id":"i1","blockId":"b","order":1,"name":"Ashwagandha","description":"Root extract","studyYear":2019}"#;
        let item: ChildItem = serde_json::from_str(json).unwrap();

        match item.content {
            ChildContent::Ingredient(detail) => {
                assert_eq!(detail.name, "Ashwagandha");
                assert_eq!(detail.study_year, Some(2019));
                assert_eq!(detail.study_url, None);
            }
            other => panic!("expected ingredient detail, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_field_is_recognised_by_label() {
        let json = r#"{"id":"f1","blockId":"b","order":1,"label":"Taste","value":"Mild"}"#;
        let item: ChildItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.content.shape(), ChildShape::Field);
        assert_eq!(item.content.summary(), "Taste");
    }

    #[test]
    fn test_child_list_names() {
        assert_eq!("customFields".parse::<ChildList>(), Ok(ChildList::CustomFields));
        assert_eq!(ChildList::Highlights.to_string(), "highlights");
        assert!("extras".parse::<ChildList>().is_err());
    }
}
