//! Schema migrations for users, allowance entries and calendar locks.
//!
//! Run with the `migrator` binary. Each migration applies raw SQL.

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_initial;

/// Every migration, oldest first.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261001_000001_initial::Migration)]
    }
}
