pub mod categories;
pub mod transactions;

pub mod prelude {
    pub use super::categories::Entity as Categories;
    pub use super::transactions::Entity as Transactions;
}
