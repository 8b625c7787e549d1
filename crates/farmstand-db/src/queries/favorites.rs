use anyhow::Result;

use crate::Session;
use crate::models::{FavoritePostRow, FavoriteRow};

impl Session {
    /// Every favorite row for the pair. Empty means the user hasn't saved
    /// the post yet; check this before `add_favorite`.
    pub fn find_duplicate_favorites(&self, user_id: i64, post_id: i64) -> Result<Vec<FavoriteRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id, post_id FROM favorite WHERE post_id = ?1 AND user_id = ?2")?;

        let rows = stmt
            .query_map([post_id, user_id], |row| {
                Ok(FavoriteRow {
                    user_id: row.get(0)?,
                    post_id: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Save a post for a user. Nothing stops a second identical row.
    pub fn add_favorite(&self, user_id: i64, post_id: i64) -> Result<usize> {
        let rows = self.conn.execute(
            "INSERT INTO favorite (user_id, post_id) VALUES (?1, ?2)",
            [user_id, post_id],
        )?;
        Ok(rows)
    }

    pub fn delete_favorite(&self, user_id: i64, post_id: i64) -> Result<usize> {
        let rows = self.conn.execute(
            "DELETE FROM favorite WHERE post_id = ?1 AND user_id = ?2",
            [post_id, user_id],
        )?;
        Ok(rows)
    }

    /// Posts a user has saved, if that user is active.
    ///
    /// The active check is on the user who saved the favorites, not on the
    /// posts' owners: a disabled owner's post stays in the list.
    pub fn favorites_by_user(&self, user_id: i64) -> Result<Vec<FavoritePostRow>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT f.user_id, f.post_id, p.user_id, p.price, p.quantity, p.unit,
                      p.product, p.category, p.zip, p.description, photo.file_path
               FROM favorite f
               INNER JOIN post p ON p.id = f.post_id
               INNER JOIN "user" u ON u.id = f.user_id
               LEFT JOIN photo ON p.id = photo.id
               WHERE u.id = ?1 AND u.active = TRUE"#,
        )?;

        let rows = stmt
            .query_map([user_id], |row| {
                Ok(FavoritePostRow {
                    user_id: row.get(0)?,
                    post_id: row.get(1)?,
                    owner_id: row.get(2)?,
                    price: row.get(3)?,
                    quantity: row.get(4)?,
                    unit: row.get(5)?,
                    product: row.get(6)?,
                    category: row.get(7)?,
                    zip: row.get(8)?,
                    description: row.get(9)?,
                    file_path: row.get(10)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
