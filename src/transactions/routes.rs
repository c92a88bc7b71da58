use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, put}, Json, Router};
use sea_orm::prelude::Uuid;

use crate::{extract::JsonBody, models::SuccessModel, state::AppState};

use super::{error::{Error, Result}, models::{GetSummaryQueryParams, GetTransactionsQueryParams, SummaryModel, TransactionModel, TransactionRequestModel}, DynTransactionService};

pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(get_transactions).post(post_transaction))
        .route("/{id}", put(put_transaction).delete(delete_transaction))
        .with_state(app_state)
}

pub fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(get_summary))
        .with_state(app_state)
}

///
/// Ids that cannot be parsed can never match a row
///
fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::TransactionNotFound(id.to_string()))
}

pub async fn get_transactions(
    State(tx_svc): State<DynTransactionService>,
    Query(query): Query<GetTransactionsQueryParams>,
) -> Result<Json<Vec<TransactionModel>>> {
    Ok(Json(tx_svc.get_transactions(query).await?))
}

pub async fn post_transaction(
    State(tx_svc): State<DynTransactionService>,
    JsonBody(body): JsonBody<TransactionRequestModel>,
) -> Result<(StatusCode, Json<TransactionModel>)> {
    Ok((StatusCode::CREATED, Json(tx_svc.create_transaction(body).await?)))
}

pub async fn put_transaction(
    State(tx_svc): State<DynTransactionService>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TransactionRequestModel>,
) -> Result<Json<TransactionModel>> {
    let id = parse_id(&id)?;
    Ok(Json(tx_svc.update_transaction(id, body).await?))
}

pub async fn delete_transaction(
    State(tx_svc): State<DynTransactionService>,
    Path(id): Path<String>,
) -> Result<Json<SuccessModel>> {
    let id = parse_id(&id)?;
    tx_svc.delete_transaction(id).await?;
    Ok(Json(SuccessModel::ok()))
}

pub async fn get_summary(
    State(tx_svc): State<DynTransactionService>,
    Query(query): Query<GetSummaryQueryParams>,
) -> Result<Json<SummaryModel>> {
    Ok(Json(tx_svc.get_summary(query).await?))
}
