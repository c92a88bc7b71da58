use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use sea_orm::{Database, DbConn, EntityTrait, PaginatorTrait, Set};
use serde_json::json;
use uuid::Uuid;

use crate::{categories::{models::GetCategoriesQueryParams, CategoryRequestModel, CategoryService, Error}, date_time_provider::MockDateTimeProvider, db::init_schema, entities::{categories, prelude::*, transactions}, models::EntryType, validations};

use super::DbConnCategoryService;

lazy_static! {
    static ref FOOD_ID: Uuid = Uuid::parse_str("c8be0f8e-629e-46ce-9e76-e691caa0714b").unwrap();
    static ref GROCERIES_ID: Uuid = Uuid::parse_str("0fd2a2ce-cce1-43c4-a69d-8b1b523f0127").unwrap();
    static ref DINING_ID: Uuid = Uuid::parse_str("f017369e-9dd1-4434-b197-40361cc0dbcd").unwrap();
    static ref SALARY_ID: Uuid = Uuid::parse_str("2dd9ffbe-5d15-401f-b637-7f3e2de9bf1f").unwrap();
    static ref BILLS_ID: Uuid = Uuid::parse_str("be5ca263-2307-4e5a-acbd-3281fb81ea60").unwrap();

    // 2024-11-10 12:03:34
    static ref TEST_DT: DateTime<Utc> = DateTime::<Utc>::from_timestamp_millis(1731240214000).unwrap();
}

async fn create_test_db(create_cats: bool) -> anyhow::Result<DbConn> {
    // In-memory Sqlite connection
    let db = Database::connect("sqlite::memory:").await?;
    init_schema(&db).await?;

    // Insert test categories if create_cats is true
    if create_cats {
        let cats = vec![
            (*FOOD_ID, "Food", EntryType::Expense, None),
            (*GROCERIES_ID, "Groceries", EntryType::Expense, Some(*FOOD_ID)),
            (*DINING_ID, "Dining", EntryType::Expense, Some(*FOOD_ID)),
            (*BILLS_ID, "Bills", EntryType::Expense, None),
            (*SALARY_ID, "Salary", EntryType::Income, None),
        ];
        let cats = cats.into_iter().map(|(id, name, entry_type, parent_id)| {
            categories::ActiveModel {
                id: Set(id),
                name: Set(String::from(name)),
                entry_type: Set(entry_type),
                parent_id: Set(parent_id),
                created_at: Set(*TEST_DT),
            }
        });
        Categories::insert_many(cats).exec(&db).await?;
    }

    Ok(db)
}

async fn create_test_service(create_cats: bool) -> anyhow::Result<(DbConnCategoryService, DbConn)> {
    let db = create_test_db(create_cats).await?;

    let mut mock_dt_service = MockDateTimeProvider::new();
    mock_dt_service.expect_utc_now().returning(|| TEST_DT.clone());

    // Service
    let svc = DbConnCategoryService {
        db: db.clone(),
        dt_provider: Arc::new(mock_dt_service),
    };

    Ok((svc, db))
}

async fn insert_tx(db: &DbConn, category_id: Option<Uuid>, subcategory_id: Option<Uuid>) -> anyhow::Result<()> {
    Transactions::insert(transactions::ActiveModel {
        id: Set(Uuid::now_v7()),
        description: Set(String::from("Test")),
        amount: Set(25.0),
        entry_type: Set(EntryType::Expense),
        category_id: Set(category_id),
        subcategory_id: Set(subcategory_id),
        created_at: Set(Utc.with_ymd_and_hms(2024, 11, 10, 0, 0, 0).unwrap()),
    }).exec(db).await?;
    Ok(())
}

fn cat_req(name: &str, entry_type: &str, parent_id: Option<Uuid>) -> CategoryRequestModel {
    CategoryRequestModel {
        name: Some(json!(name)),
        entry_type: Some(json!(entry_type)),
        parent_id: parent_id.map(|id| json!(id.to_string())),
    }
}

#[tokio::test]
async fn test_creation_of_category() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(false).await?;
    let new_cat = svc.create_cat(cat_req("  Salary ", "income", None)).await?;

    let db_cat = Categories::find_by_id(new_cat.id).one(&db).await?;
    assert!(db_cat.is_some());

    let db_cat = db_cat.unwrap();
    assert_eq!("Salary", db_cat.name);
    assert_eq!(EntryType::Income, db_cat.entry_type);
    assert_eq!(None, db_cat.parent_id);
    assert_eq!(*TEST_DT, db_cat.created_at);

    assert_eq!(db_cat.name, new_cat.name);
    assert_eq!(db_cat.entry_type, new_cat.entry_type);
    assert_eq!(db_cat.created_at, new_cat.created_at);
    assert!(new_cat.subcategories.is_none());

    Ok(())
}

#[tokio::test]
async fn test_creation_of_subcategory() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;
    let new_cat = svc.create_cat(cat_req("Snacks", "expense", Some(*FOOD_ID))).await?;

    let db_cat = Categories::find_by_id(new_cat.id).one(&db).await?.unwrap();
    assert_eq!(Some(*FOOD_ID), db_cat.parent_id);

    // Names are not unique
    let dup = svc.create_cat(cat_req("Snacks", "expense", Some(*FOOD_ID))).await?;
    assert_ne!(new_cat.id, dup.id);

    Ok(())
}

#[tokio::test]
async fn test_subcategory_type_is_not_checked_against_parent() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;

    // An income subcategory under an expense category is accepted as-is
    let new_cat = svc.create_cat(cat_req("Cashback", "income", Some(*FOOD_ID))).await?;
    let db_cat = Categories::find_by_id(new_cat.id).one(&db).await?.unwrap();
    assert_eq!(EntryType::Income, db_cat.entry_type);
    assert_eq!(Some(*FOOD_ID), db_cat.parent_id);

    Ok(())
}

#[tokio::test]
async fn test_invalid_categories_persist_nothing() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(false).await?;

    let res = svc.create_cat(cat_req("   ", "income", None)).await;
    assert!(matches!(res, Err(Error::Validation(validations::error::Error::CategoryNameRequired))));

    let res = svc.create_cat(cat_req("Gifts", "gift", None)).await;
    assert!(matches!(res, Err(Error::Validation(validations::error::Error::InvalidType))));

    let res = svc.create_cat(cat_req(&"g".repeat(101), "expense", None)).await;
    assert!(matches!(res, Err(Error::Validation(validations::error::Error::CategoryNameTooLong))));

    let mut missing_name = cat_req("", "expense", None);
    missing_name.name = None;
    let res = svc.create_cat(missing_name).await;
    assert!(matches!(res, Err(Error::Validation(validations::error::Error::CategoryNameRequired))));

    assert_eq!(0, Categories::find().count(&db).await?);

    // Exactly 100 characters is fine
    svc.create_cat(cat_req(&"g".repeat(100), "expense", None)).await?;
    assert_eq!(1, Categories::find().count(&db).await?);

    Ok(())
}

#[tokio::test]
async fn test_get_categories_with_subcategories() -> anyhow::Result<()> {
    let (svc, _db) = create_test_service(true).await?;

    let cats = svc.get_cats(GetCategoriesQueryParams::default()).await?;

    // Top-level only, ordered by name
    assert_eq!(
        vec!["Bills", "Food", "Salary"],
        cats.iter().map(|cat| cat.name.as_str()).collect::<Vec<_>>()
    );

    let bills = &cats[0];
    assert_eq!(Some(0), bills.subcategories.as_ref().map(Vec::len));

    let food = &cats[1];
    assert_eq!(*FOOD_ID, food.id);
    let subs = food.subcategories.as_ref().unwrap();
    assert_eq!(2, subs.len());
    assert_eq!(*DINING_ID, subs[0].id);
    assert_eq!("Dining", subs[0].name);
    assert_eq!(Some(*FOOD_ID), subs[0].parent_id);
    assert_eq!(*GROCERIES_ID, subs[1].id);
    assert_eq!("Groceries", subs[1].name);

    Ok(())
}

#[tokio::test]
async fn test_get_categories_by_type() -> anyhow::Result<()> {
    let (svc, _db) = create_test_service(true).await?;

    let income = svc.get_cats(GetCategoriesQueryParams { entry_type: Some(String::from("income")) }).await?;
    assert_eq!(1, income.len());
    assert_eq!(*SALARY_ID, income[0].id);

    let expense = svc.get_cats(GetCategoriesQueryParams { entry_type: Some(String::from("expense")) }).await?;
    assert_eq!(
        vec!["Bills", "Food"],
        expense.iter().map(|cat| cat.name.as_str()).collect::<Vec<_>>()
    );

    // An unknown type lists everything
    let all = svc.get_cats(GetCategoriesQueryParams { entry_type: Some(String::from("other")) }).await?;
    assert_eq!(3, all.len());

    Ok(())
}

#[tokio::test]
async fn test_get_categories_empty() -> anyhow::Result<()> {
    let (svc, _db) = create_test_service(false).await?;
    assert!(svc.get_cats(GetCategoriesQueryParams::default()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_update_category() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;

    let updated = svc.update_cat(*DINING_ID, cat_req("Restaurants", "expense", None)).await?;
    assert_eq!(*DINING_ID, updated.id);
    assert_eq!("Restaurants", updated.name);
    assert_eq!(None, updated.parent_id);
    assert_eq!(*TEST_DT, updated.created_at);

    let db_cat = Categories::find_by_id(*DINING_ID).one(&db).await?.unwrap();
    assert_eq!("Restaurants", db_cat.name);
    assert_eq!(None, db_cat.parent_id);

    // Now a top-level category of its own
    let cats = svc.get_cats(GetCategoriesQueryParams::default()).await?;
    assert_eq!(
        vec!["Bills", "Food", "Restaurants", "Salary"],
        cats.iter().map(|cat| cat.name.as_str()).collect::<Vec<_>>()
    );

    Ok(())
}

#[tokio::test]
async fn test_update_missing_category() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;
    let missing_id = Uuid::now_v7();

    let res = svc.update_cat(missing_id, cat_req("Ghost", "expense", None)).await;
    assert!(matches!(res, Err(Error::CategoryNotFound(ref id)) if *id == missing_id.to_string()));

    let res = svc.update_cat(*FOOD_ID, cat_req("", "expense", None)).await;
    assert!(matches!(res, Err(Error::Validation(_))));

    assert_eq!(5, Categories::find().count(&db).await?);
    let food = Categories::find_by_id(*FOOD_ID).one(&db).await?.unwrap();
    assert_eq!("Food", food.name);

    Ok(())
}

#[tokio::test]
async fn test_delete_category_cascades() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;

    svc.delete_cat(*FOOD_ID).await?;

    let remaining = Categories::find().all(&db).await?;
    let mut remaining_ids = remaining.iter().map(|cat| cat.id).collect::<Vec<_>>();
    remaining_ids.sort();
    let mut expected = vec![*BILLS_ID, *SALARY_ID];
    expected.sort();
    assert_eq!(expected, remaining_ids);

    Ok(())
}

#[tokio::test]
async fn test_delete_subcategory_only() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;

    svc.delete_cat(*DINING_ID).await?;

    assert!(Categories::find_by_id(*DINING_ID).one(&db).await?.is_none());
    assert!(Categories::find_by_id(*FOOD_ID).one(&db).await?.is_some());
    assert!(Categories::find_by_id(*GROCERIES_ID).one(&db).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_delete_category_in_use() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;
    insert_tx(&db, Some(*BILLS_ID), None).await?;

    let res = svc.delete_cat(*BILLS_ID).await;
    assert!(matches!(res, Err(Error::CategoryInUse(ref id)) if *id == BILLS_ID.to_string()));
    assert!(Categories::find_by_id(*BILLS_ID).one(&db).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_delete_category_in_use_through_subcategory() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;
    // Only the subcategory is referenced, and only as a subcategory
    insert_tx(&db, None, Some(*GROCERIES_ID)).await?;

    let res = svc.delete_cat(*FOOD_ID).await;
    assert!(matches!(res, Err(Error::CategoryInUse(_))));

    // Nothing was deleted
    assert_eq!(5, Categories::find().count(&db).await?);

    // The untouched sibling can still go
    svc.delete_cat(*DINING_ID).await?;
    assert_eq!(4, Categories::find().count(&db).await?);

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_category() -> anyhow::Result<()> {
    let (svc, db) = create_test_service(true).await?;
    let missing_id = Uuid::now_v7();

    let res = svc.delete_cat(missing_id).await;
    assert!(matches!(res, Err(Error::CategoryNotFound(ref id)) if *id == missing_id.to_string()));
    assert_eq!(5, Categories::find().count(&db).await?);

    Ok(())
}
