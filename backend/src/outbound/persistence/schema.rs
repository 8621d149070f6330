//! Diesel table definitions for the CRM schema.
//!
//! Kept in sync with `backend/migrations` by hand. Column documentation
//! mirrors the comments in the migration SQL.

diesel::table! {
    /// Registered accounts. `email` carries a unique index.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Normalised, lower-case email address (max 180 characters).
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// Stored role names; `ROLE_USER` is implied and usually absent.
        roles -> Array<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
