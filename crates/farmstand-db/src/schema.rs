use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Create the marketplace tables if they are missing. Idempotent; there is
/// no version table because the layout never changes in place.
///
/// Photo and favorite rows reference posts, but nothing cascades:
/// deleting a post removes its dependents with explicit statements.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS "user" (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            password    TEXT NOT NULL,
            rating      REAL NOT NULL DEFAULT 0,
            active      INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_user_email
            ON "user"(email);

        CREATE TABLE IF NOT EXISTS post (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES "user"(id),
            price       REAL NOT NULL,
            quantity    INTEGER NOT NULL,
            unit        TEXT NOT NULL,
            product     TEXT NOT NULL,
            category    TEXT NOT NULL,
            zip         TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_post_user
            ON post(user_id);

        CREATE TABLE IF NOT EXISTS photo (
            id          INTEGER PRIMARY KEY REFERENCES post(id),
            file_path   TEXT
        );

        -- No UNIQUE(user_id, post_id): callers check for duplicates first
        CREATE TABLE IF NOT EXISTS favorite (
            user_id     INTEGER NOT NULL REFERENCES "user"(id),
            post_id     INTEGER NOT NULL REFERENCES post(id)
        );

        CREATE INDEX IF NOT EXISTS idx_favorite_user
            ON favorite(user_id, post_id);

        CREATE INDEX IF NOT EXISTS idx_favorite_post
            ON favorite(post_id);
        "#,
    )?;

    info!("Database schema ready");
    Ok(())
}
