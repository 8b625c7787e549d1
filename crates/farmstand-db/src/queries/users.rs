use anyhow::Result;
use rusqlite::Row;

use super::OptionalExt;
use crate::Session;
use crate::models::UserRow;

const USER_COLUMNS: &str = "id, name, email, password, rating, active";

impl Session {
    /// Insert a user. The password is stored as given; hash it first.
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        rating: f64,
        active: bool,
    ) -> Result<usize> {
        let rows = self.conn.execute(
            r#"INSERT INTO "user" (name, email, password, rating, active) VALUES (?1, ?2, ?3, ?4, ?5)"#,
            rusqlite::params![name, email, password, rating, active],
        )?;
        Ok(rows)
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE email = ?1"#))?;
        stmt.query_row([email], user_from_row).optional()
    }

    pub fn find_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = ?1"#))?;
        stmt.query_row([id], user_from_row).optional()
    }

    pub fn all_users(&self) -> Result<Vec<UserRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!(r#"SELECT {USER_COLUMNS} FROM "user" ORDER BY id"#))?;

        let rows = stmt
            .query_map([], user_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Overwrite name, email and password. Rating and the active flag have
    /// their own paths.
    pub fn update_user(&self, name: &str, email: &str, password: &str, id: i64) -> Result<usize> {
        let rows = self.conn.execute(
            r#"UPDATE "user" SET name = ?1, email = ?2, password = ?3 WHERE id = ?4"#,
            rusqlite::params![name, email, password, id],
        )?;
        Ok(rows)
    }

    /// Hide a user's posts from public listings.
    pub fn disable_user(&self, id: i64) -> Result<usize> {
        let rows = self
            .conn
            .execute(r#"UPDATE "user" SET active = FALSE WHERE id = ?1"#, [id])?;
        Ok(rows)
    }

    pub fn enable_user(&self, id: i64) -> Result<usize> {
        let rows = self
            .conn
            .execute(r#"UPDATE "user" SET active = TRUE WHERE id = ?1"#, [id])?;
        Ok(rows)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        rating: row.get(4)?,
        active: row.get(5)?,
    })
}
