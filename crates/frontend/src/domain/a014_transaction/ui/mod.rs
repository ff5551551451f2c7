pub mod list;

pub use list::TransactionsList;
