use sea_orm::entity::prelude::*;

use crate::models::EntryType;

///
/// A named grouping of transactions. Rows with a `parent_id`
/// are subcategories of the referenced top-level row.
///
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_name = "type", indexed)]
    pub entry_type: EntryType,
    #[sea_orm(indexed)]
    pub parent_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
