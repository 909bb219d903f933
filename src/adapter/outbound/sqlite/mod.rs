//! SQLite persistence adapters.

pub mod database;
pub mod intent_store;
pub mod interaction_store;
pub mod pool_store;
pub mod suggestion_store;

pub use intent_store::SqliteIntentStore;
pub use interaction_store::SqliteInteractionStore;
pub use pool_store::SqlitePoolYieldStore;
pub use suggestion_store::SqliteSuggestionStore;

diesel::define_sql_function! {
    /// SQLite rowid of the most recent insert on this connection.
    fn last_insert_rowid() -> diesel::sql_types::Integer;
}
