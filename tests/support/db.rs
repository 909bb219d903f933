use tempfile::TempDir;
use yieldscout::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};

/// File-backed temporary database with migrations applied.
///
/// The `TempDir` guard must outlive the pool; drop order removes the file
/// after the last connection closes.
pub fn temp_db() -> (TempDir, DbPool) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("yieldscout-test.db");
    let pool = create_pool(path.to_str().expect("utf-8 temp path")).expect("create pool");
    run_migrations(&pool).expect("run migrations");
    (dir, pool)
}
