use std::{collections::{HashMap, HashSet}, sync::Arc};

use async_trait::async_trait;
use sea_orm::{prelude::Uuid, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait};

use crate::{date_time_provider::DynDateTimeProvider, entities::{categories, prelude::*, transactions}, models::EntryType, validations::{self, validate_transaction}};

use {category_path::*, error::*, filter::*, models::*};

pub mod category_path;
pub mod error;
pub mod filter;
pub mod models;
pub mod routes;

pub type DynTransactionService = Arc<dyn TransactionService + Send + Sync>;


#[async_trait]
pub trait TransactionService {
    ///
    /// Lists transactions, most recent first, optionally restricted
    /// to one month and/or one type
    ///
    async fn get_transactions(
        &self,
        query: GetTransactionsQueryParams,
    ) -> Result<Vec<TransactionModel>>;

    async fn create_transaction(
        &self,
        req: TransactionRequestModel,
    ) -> Result<TransactionModel>;

    async fn update_transaction(
        &self,
        id: Uuid,
        req: TransactionRequestModel,
    ) -> Result<TransactionModel>;

    async fn delete_transaction(&self, id: Uuid) -> Result<()>;

    ///
    /// Totals the income and expenses of a month.
    /// Defaults to the current month.
    ///
    async fn get_summary(&self, query: GetSummaryQueryParams) -> Result<SummaryModel>;
}

pub struct DbConnTransactionService {
    db: DbConn,
    dt_provider: DynDateTimeProvider,
}

impl DbConnTransactionService {
    pub fn new_dyn(db: DbConn, dt_provider: DynDateTimeProvider) -> DynTransactionService {
        Arc::new(Self { db, dt_provider })
    }
}

#[async_trait]
impl TransactionService for DbConnTransactionService {
    async fn get_transactions(
        &self,
        query: GetTransactionsQueryParams,
    ) -> Result<Vec<TransactionModel>> {
        let mut filters = vec![];
        if let Some(month) = query.month.as_deref().filter(|m| !m.is_empty()) {
            filters.push(TransactionFilter::Month(MonthRange::parse(month)?));
        }
        // Unknown types are ignored rather than rejected
        if let Some(entry_type) = query.entry_type.as_deref().and_then(|t| t.parse::<EntryType>().ok()) {
            filters.push(TransactionFilter::Type(entry_type));
        }

        let mut select = Transactions::find();
        for filter in filters {
            select = filter.into_select_query(select);
        }

        let rows = select.order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db).await?;

        Self::enrich(&self.db, rows).await
    }

    async fn create_transaction(
        &self,
        req: TransactionRequestModel,
    ) -> Result<TransactionModel> {
        let valid = validate_transaction(
            req.description.as_ref(),
            req.amount.as_ref(),
            req.entry_type.as_ref(),
        )?;

        let tx = self.db.begin().await?;
        let (category_id, subcategory_id) = Self::resolve_category_ids(
            &tx,
            valid.entry_type,
            req.category.as_deref(),
            req.subcategory.as_deref(),
        ).await?;

        let new_tx = transactions::ActiveModel {
            id:             Set(Uuid::now_v7()),
            description:    Set(valid.description),
            amount:         Set(valid.amount.abs()),
            entry_type:     Set(valid.entry_type),
            category_id:    Set(category_id),
            subcategory_id: Set(subcategory_id),
            created_at:     Set(self.dt_provider.utc_now()),
        };
        let created = new_tx.insert(&tx).await?;
        let created = Self::enrich_one(&tx, created).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn update_transaction(
        &self,
        id: Uuid,
        req: TransactionRequestModel,
    ) -> Result<TransactionModel> {
        let valid = validate_transaction(
            req.description.as_ref(),
            req.amount.as_ref(),
            req.entry_type.as_ref(),
        )?;

        let tx = self.db.begin().await?;
        let existing = Transactions::find_by_id(id).one(&tx).await?;

        return if let Some(existing) = existing {
            let (category_id, subcategory_id) = Self::resolve_category_ids(
                &tx,
                valid.entry_type,
                req.category.as_deref(),
                req.subcategory.as_deref(),
            ).await?;

            // Every field but the id and creation stamp is replaced
            let mut existing = existing.into_active_model();
            existing.description = Set(valid.description);
            existing.amount = Set(valid.amount.abs());
            existing.entry_type = Set(valid.entry_type);
            existing.category_id = Set(category_id);
            existing.subcategory_id = Set(subcategory_id);

            let updated = Transactions::update(existing).exec(&tx).await?;
            let updated = Self::enrich_one(&tx, updated).await?;
            tx.commit().await?;

            Ok(updated)
        } else {
            Err(Error::TransactionNotFound(id.to_string()))
        };
    }

    async fn delete_transaction(&self, id: Uuid) -> Result<()> {
        let res = Transactions::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(Error::TransactionNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn get_summary(&self, query: GetSummaryQueryParams) -> Result<SummaryModel> {
        let range = match query.month.as_deref().filter(|m| !m.is_empty()) {
            Some(month) => MonthRange::parse(month)?,
            None => {
                let now = self.dt_provider.utc_now();
                MonthRange::containing(now).ok_or_else(|| {
                    validations::error::Error::InvalidMonth(now.format("%Y-%m").to_string())
                })?
            },
        };

        let rows = TransactionFilter::Month(range)
            .into_select_query(Transactions::find())
            .all(&self.db).await?;

        let (income, expense) = rows.iter().fold((0.0, 0.0), |(income, expense), tx| {
            match tx.entry_type {
                EntryType::Income => (income + tx.amount, expense),
                EntryType::Expense => (income, expense + tx.amount),
            }
        });

        Ok(SummaryModel {
            month: range.label(),
            income,
            expense,
            balance: income - expense,
            transaction_count: rows.len() as u64,
        })
    }
}

impl DbConnTransactionService {
    ///
    /// Resolves a category name (optionally `"Main > Sub"`) to category ids.
    /// The main name must be a top-level category of `entry_type`; the sub name
    /// must be a direct child of it. Lookups that fail yield `None`.
    ///
    async fn resolve_category_ids(
        conn: &impl ConnectionTrait,
        entry_type: EntryType,
        category: Option<&str>,
        subcategory: Option<&str>,
    ) -> Result<(Option<Uuid>, Option<Uuid>)> {
        let Some((main_name, sub_name)) = split_category_path(category, subcategory) else {
            return Ok((None, None));
        };

        let main_cat = Categories::find()
            .filter(categories::Column::Name.eq(main_name))
            .filter(categories::Column::EntryType.eq(entry_type))
            .filter(categories::Column::ParentId.is_null())
            .order_by_asc(categories::Column::CreatedAt)
            .one(conn).await?;

        let Some(main_cat) = main_cat else {
            return Ok((None, None));
        };

        let sub_id = if let Some(sub_name) = sub_name {
            Categories::find()
                .filter(categories::Column::Name.eq(sub_name))
                .filter(categories::Column::ParentId.eq(main_cat.id))
                .order_by_asc(categories::Column::CreatedAt)
                .one(conn).await?
                .map(|sub| sub.id)
        } else {
            None
        };

        Ok((Some(main_cat.id), sub_id))
    }

    ///
    /// Resolves the category links of every row with a single lookup
    ///
    async fn enrich(
        conn: &impl ConnectionTrait,
        rows: Vec<transactions::Model>,
    ) -> Result<Vec<TransactionModel>> {
        let ids = rows.iter()
            .flat_map(|row| [row.category_id, row.subcategory_id])
            .flatten()
            .collect::<HashSet<_>>();
        let names = Self::category_names(conn, ids).await?;

        Ok(rows.into_iter().map(|row| to_transaction_model(row, &names)).collect())
    }

    async fn enrich_one(
        conn: &impl ConnectionTrait,
        row: transactions::Model,
    ) -> Result<TransactionModel> {
        let ids = [row.category_id, row.subcategory_id].into_iter().flatten().collect();
        let names = Self::category_names(conn, ids).await?;

        Ok(to_transaction_model(row, &names))
    }

    async fn category_names(
        conn: &impl ConnectionTrait,
        ids: HashSet<Uuid>,
    ) -> Result<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cats = Categories::find()
            .filter(categories::Column::Id.is_in(ids))
            .all(conn).await?;

        Ok(cats.into_iter().map(|cat| (cat.id, cat.name)).collect())
    }
}

fn lookup_name(names: &HashMap<Uuid, String>, id: Option<Uuid>) -> Option<&str> {
    id.and_then(|id| names.get(&id)).map(String::as_str)
}

fn to_transaction_model(row: transactions::Model, names: &HashMap<Uuid, String>) -> TransactionModel {
    let category = display_category(
        lookup_name(names, row.category_id),
        lookup_name(names, row.subcategory_id),
    );

    TransactionModel {
        id: row.id,
        description: row.description,
        amount: row.amount,
        entry_type: row.entry_type,
        category,
        created_at: row.created_at,
    }
}
