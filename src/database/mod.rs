pub mod manager;
pub mod models;
pub mod transaction;
pub mod update;

pub use manager::{DatabaseError, DatabaseManager};
pub use transaction::with_transaction;
pub use update::UpdateBuilder;
