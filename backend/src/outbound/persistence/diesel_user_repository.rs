//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Rows are validated on the way out: a stored email, role, or hash that no
//! longer satisfies the domain invariants is reported as a query error rather
//! than silently repaired.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, RoleSet, UserAccount, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRolesUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let corrupt = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let email = EmailAddress::new(&row.email).map_err(corrupt)?;
    let password_hash = PasswordHash::new(row.password_hash.as_str()).map_err(corrupt)?;
    let roles = RoleSet::try_from_strings(row.roles.iter().map(String::as_str)).map_err(corrupt)?;
    Ok(UserAccount::new(
        UserId::from_uuid(row.id),
        email,
        password_hash,
        roles,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *account.id().as_uuid(),
            email: account.email().as_ref(),
            password_hash: account.password_hash().as_str(),
            roles: account.roles().to_strings(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    debug!(email = %account.email(), "insert hit unique email index");
                    UserPersistenceError::duplicate(account.email().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;

        Ok(())
    }

    async fn update_roles(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserRolesUpdate {
            roles: account.roles().to_strings(),
            updated_at: Utc::now(),
        };

        let updated = diesel::update(users::table.filter(users::id.eq(account.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::query(format!(
                "user {} not found for role update",
                account.id()
            )));
        }
        Ok(())
    }
}
