//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Account storage backed by PostgreSQL through `diesel-async` and a `bb8`
//! pool, plus the embedded schema migrations.
//!
//! Row structs and the Diesel `table!` definitions stay private; adapters
//! hand only domain types across the port boundary and map every Diesel or
//! pool failure onto [`crate::domain::ports::UserPersistenceError`].
//!
//! # Example
//!
//! ```ignore
//! use crm_backend::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/crm");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations, run_pending_migrations_async};
pub use pool::{DbPool, PoolConfig, PoolError};
