use sea_orm::entity::prelude::*;

use crate::models::EntryType;

///
/// A single income or expense. The category links are loose:
/// they are only resolved to names when read.
///
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    #[sea_orm(column_name = "type", indexed)]
    pub entry_type: EntryType,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
