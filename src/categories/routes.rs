use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, put}, Json, Router};
use uuid::Uuid;

use crate::{categories::Result, extract::JsonBody, models::SuccessModel, state::AppState};

use super::{error::Error, models::GetCategoriesQueryParams, CategoryModel, CategoryRequestModel, DynCategoryService};

pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(get_categories).post(post_category))
        .route("/{id}", put(update_category).delete(delete_category))
        .with_state(app_state)
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::CategoryNotFound(id.to_string()))
}

pub async fn get_categories(
    State(cat_svc): State<DynCategoryService>,
    Query(query): Query<GetCategoriesQueryParams>,
) -> Result<Json<Vec<CategoryModel>>> {
    Ok(Json(cat_svc.get_cats(query).await?))
}

pub async fn post_category(
    State(cat_svc): State<DynCategoryService>,
    JsonBody(body): JsonBody<CategoryRequestModel>,
) -> Result<(StatusCode, Json<CategoryModel>)> {
    Ok((StatusCode::CREATED, Json(cat_svc.create_cat(body).await?)))
}

pub async fn update_category(
    State(cat_svc): State<DynCategoryService>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<CategoryRequestModel>,
) -> Result<Json<CategoryModel>> {
    let id = parse_id(&id)?;
    Ok(Json(cat_svc.update_cat(id, body).await?))
}

pub async fn delete_category(
    State(cat_svc): State<DynCategoryService>,
    Path(id): Path<String>,
) -> Result<Json<SuccessModel>> {
    let id = parse_id(&id)?;
    cat_svc.delete_cat(id).await?;
    Ok(Json(SuccessModel::ok()))
}
