use std::{env, sync::Arc};

#[cfg(test)]
use mockall::automock;

pub type DynEnvProvider = Arc<dyn EnvProvider + Send + Sync>;

#[cfg_attr(test, automock)]
pub trait EnvProvider {
    /// Returns the variable's value, or `None` if it is unset or not unicode
    fn get_var(&self, key: &str) -> Option<String>;
}

pub struct CoreEnvProvider;

impl CoreEnvProvider {
    pub fn new_dyn() -> DynEnvProvider {
        Arc::new(CoreEnvProvider)
    }
}

impl EnvProvider for CoreEnvProvider {
    fn get_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
