use axum_macros::FromRef;

use crate::{categories::DynCategoryService, transactions::DynTransactionService};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub cat_svc: DynCategoryService,
    pub tx_svc: DynTransactionService,
}
