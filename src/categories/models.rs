use sea_orm::prelude::{DateTimeUtc, Uuid};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{entities::categories, models::EntryType};

#[derive(Debug, Default, Deserialize)]
pub struct GetCategoriesQueryParams {
    /// `income` or `expense`. Any other value is ignored.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

///
/// A category as shown to clients.
/// Top-level categories carry their direct subcategories.
///
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryModel {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<CategoryModel>>,
}

impl From<categories::Model> for CategoryModel {
    fn from(value: categories::Model) -> Self {
        CategoryModel {
            id: value.id,
            name: value.name,
            entry_type: value.entry_type,
            parent_id: value.parent_id,
            created_at: value.created_at,
            subcategories: None,
        }
    }
}

///
/// Body of category create and update requests.
/// Fields stay loose here so each rule can report its own message.
///
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequestModel {
    pub name: Option<Value>,
    #[serde(rename = "type")]
    pub entry_type: Option<Value>,
    /// Empty or absent for a top-level category
    pub parent_id: Option<Value>,
}
