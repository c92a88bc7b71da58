use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use sea_orm::{prelude::Uuid, ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};

use crate::{date_time_provider::DynDateTimeProvider, entities::{categories, prelude::*, transactions}, models::EntryType, validations::validate_category};

use {error::*, models::*};

pub mod models;
pub mod error;

#[cfg(test)]
mod test;
pub mod routes;

pub type DynCategoryService = Arc<dyn CategoryService + Send + Sync>;

#[async_trait]
pub trait CategoryService {
    ///
    /// Lists top-level categories by name, each with its subcategories by name
    ///
    async fn get_cats(&self, query: GetCategoriesQueryParams) -> Result<Vec<CategoryModel>>;
    async fn create_cat(&self, cat: CategoryRequestModel) -> Result<CategoryModel>;
    async fn update_cat(&self, id: Uuid, cat: CategoryRequestModel) -> Result<CategoryModel>;
    ///
    /// Deletes a category along with its subcategories.
    /// Refused while any transaction links to one of them.
    ///
    async fn delete_cat(&self, id: Uuid) -> Result<()>;
}

pub struct DbConnCategoryService {
    db: DbConn,
    dt_provider: DynDateTimeProvider,
}

#[async_trait]
impl CategoryService for DbConnCategoryService {
    async fn get_cats(&self, query: GetCategoriesQueryParams) -> Result<Vec<CategoryModel>> {
        let mut select = Categories::find().filter(categories::Column::ParentId.is_null());
        if let Some(entry_type) = query.entry_type.as_deref().and_then(|t| t.parse::<EntryType>().ok()) {
            select = select.filter(categories::Column::EntryType.eq(entry_type));
        }

        let cats = select
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::CreatedAt)
            .all(&self.db).await?;
        if cats.is_empty() {
            return Ok(vec![]);
        }

        // Fetch the subcategories of every listed category at once
        let subcats = Categories::find()
            .filter(categories::Column::ParentId.is_in(cats.iter().map(|cat| cat.id)))
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::CreatedAt)
            .all(&self.db).await?;

        let mut subcats_by_parent: HashMap<Uuid, Vec<CategoryModel>> = HashMap::new();
        for subcat in subcats {
            if let Some(parent_id) = subcat.parent_id {
                subcats_by_parent.entry(parent_id).or_default().push(subcat.into());
            }
        }

        Ok(
            cats.into_iter().map(|cat| {
                let subcategories = subcats_by_parent.remove(&cat.id).unwrap_or_default();
                CategoryModel {
                    subcategories: Some(subcategories),
                    ..cat.into()
                }
            })
                .collect()
        )
    }

    async fn create_cat(&self, create_cat: CategoryRequestModel) -> Result<CategoryModel> {
        let valid = validate_category(
            create_cat.name.as_ref(),
            create_cat.entry_type.as_ref(),
            create_cat.parent_id.as_ref(),
        )?;

        let new_cat = categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(valid.name),
            entry_type: Set(valid.entry_type),
            parent_id: Set(valid.parent_id),
            created_at: Set(self.dt_provider.utc_now()),
        };
        let created = new_cat.insert(&self.db).await?;

        Ok(created.into())
    }

    async fn update_cat(&self, id: Uuid, cat: CategoryRequestModel) -> Result<CategoryModel> {
        let valid = validate_category(
            cat.name.as_ref(),
            cat.entry_type.as_ref(),
            cat.parent_id.as_ref(),
        )?;

        let tx = self.db.begin().await?;
        // Find the category to update
        let ex_cat = Categories::find_by_id(id).one(&tx).await?;

        return if let Some(ex_cat) = ex_cat {
            let mut ex_cat = ex_cat.into_active_model();
            ex_cat.name = Set(valid.name);
            ex_cat.entry_type = Set(valid.entry_type);
            ex_cat.parent_id = Set(valid.parent_id);
            let updated = Categories::update(ex_cat).exec(&tx).await?;
            tx.commit().await?;

            Ok(updated.into())
        } else {
            Err(Error::CategoryNotFound(id.to_string()))
        };
    }

    async fn delete_cat(&self, id: Uuid) -> Result<()> {
        // Every step below commits together or not at all
        let tx = self.db.begin().await?;

        let mut linked_ids: Vec<Uuid> = Categories::find().select_only()
            .column(categories::Column::Id)
            .filter(categories::Column::ParentId.eq(id))
            .into_tuple()
            .all(&tx).await?;
        linked_ids.push(id);

        let in_use = Transactions::find()
            .filter(
                Condition::any()
                    .add(transactions::Column::CategoryId.is_in(linked_ids.clone()))
                    .add(transactions::Column::SubcategoryId.is_in(linked_ids))
            )
            .count(&tx).await?;
        if in_use > 0 {
            return Err(Error::CategoryInUse(id.to_string()));
        }

        Categories::delete_many()
            .filter(categories::Column::ParentId.eq(id))
            .exec(&tx).await?;
        let res = Categories::delete_by_id(id).exec(&tx).await?;

        // Dropping the uncommitted transaction rolls back the subcategory delete
        if res.rows_affected == 0 {
            return Err(Error::CategoryNotFound(id.to_string()));
        }
        tx.commit().await?;

        Ok(())
    }
}

impl DbConnCategoryService {
    pub fn new_dyn(db: DbConn, dt_provider: DynDateTimeProvider) -> DynCategoryService {
        Arc::new(DbConnCategoryService { db, dt_provider })
    }
}
