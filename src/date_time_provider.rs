use std::sync::Arc;

use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

pub type DynDateTimeProvider = Arc<dyn DateTimeProvider + Send + Sync>;

///
/// Source of the current time. Every `created_at` stamp
/// is taken from here so tests can pin the clock.
///
#[cfg_attr(test, automock)]
pub trait DateTimeProvider {
    fn utc_now(&self) -> DateTime<Utc>;
}

pub struct CoreTimeProvider;

impl CoreTimeProvider {
    pub fn new_dyn() -> DynDateTimeProvider {
        Arc::new(CoreTimeProvider)
    }
}

impl DateTimeProvider for CoreTimeProvider {
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
