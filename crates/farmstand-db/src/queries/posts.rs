use anyhow::Result;
use rusqlite::{Row, params};
use tracing::debug;

use super::{OptionalExt, alternation};
use crate::Session;
use crate::models::{CreatedPost, NewPost, PostChanges, PostRow};

/// Post joined with its owner (inner) and photo (left: the file may not be
/// uploaded yet). `p.id` is aliased so it can't be confused with `photo.id`.
const POST_SELECT: &str = r#"
    SELECT p.id AS post_id, p.user_id, p.price, p.quantity, p.unit, p.product,
           p.category, p.zip, p.description,
           u.name AS owner_name, u.email AS owner_email,
           u.rating AS owner_rating, u.active AS owner_active,
           photo.file_path
    FROM post p
    INNER JOIN "user" u ON u.id = p.user_id
    LEFT JOIN photo ON p.id = photo.id
"#;

impl Session {
    /// Insert a post. The caller follows up with `init_photo(id)`.
    pub fn create_post(&self, post: &NewPost<'_>) -> Result<CreatedPost> {
        let rowcount = self.conn.execute(
            "INSERT INTO post (user_id, price, quantity, unit, product, category, zip, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                post.user_id,
                post.price,
                post.quantity,
                post.unit,
                post.product,
                post.category,
                post.zip,
                post.description,
            ],
        )?;

        Ok(CreatedPost {
            id: self.conn.last_insert_rowid(),
            rowcount,
        })
    }

    /// Look up a single post regardless of whether its owner is active.
    pub fn find_post_by_id(&self, id: i64) -> Result<Option<PostRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT} WHERE p.id = ?1"))?;
        stmt.query_row([id], post_from_row).optional()
    }

    /// Posts listed by one user, empty if that user is disabled.
    pub fn posts_by_user(&self, user_id: i64) -> Result<Vec<PostRow>> {
        self.query_posts(
            &format!("{POST_SELECT} WHERE u.active = TRUE AND p.user_id = ?1 ORDER BY p.id"),
            params![user_id],
        )
    }

    /// Every post whose owner is active.
    pub fn all_posts(&self) -> Result<Vec<PostRow>> {
        self.query_posts(
            &format!("{POST_SELECT} WHERE u.active = TRUE ORDER BY p.id"),
            params![],
        )
    }

    /// Edit a listing. Owner and category cannot be changed here.
    pub fn update_post(&self, changes: &PostChanges<'_>, id: i64) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE post
             SET price = ?1, product = ?2, unit = ?3, quantity = ?4, zip = ?5, description = ?6
             WHERE id = ?7",
            params![
                changes.price,
                changes.product,
                changes.unit,
                changes.quantity,
                changes.zip,
                changes.description,
                id,
            ],
        )?;
        Ok(rows)
    }

    /// Delete a post with its photo and favorites in one transaction.
    /// Returns the row count of the post delete alone, so 0 means there
    /// was no such post.
    pub fn delete_post(&mut self, id: i64) -> Result<usize> {
        let tx = self.conn.transaction()?;

        let photos = tx.execute("DELETE FROM photo WHERE id = ?1", [id])?;
        let favorites = tx.execute("DELETE FROM favorite WHERE post_id = ?1", [id])?;
        let removed = tx.execute("DELETE FROM post WHERE id = ?1", [id])?;

        tx.commit()?;

        debug!(post_id = id, photos, favorites, removed, "Deleted post");
        Ok(removed)
    }

    /// Posts whose product or category matches any of `terms`,
    /// case-insensitively.
    ///
    /// AND binds tighter than OR, so only the product match is limited to
    /// active owners: a category match returns the post even when its owner
    /// is disabled.
    pub fn search_posts<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<PostRow>> {
        let pattern = alternation(terms);
        self.query_posts(
            &format!(
                "{POST_SELECT}
                 WHERE u.active = TRUE AND p.product REGEXP ?1 OR p.category REGEXP ?1
                 ORDER BY p.id"
            ),
            params![pattern],
        )
    }

    /// Posts of active owners whose category matches one of `keys`.
    ///
    /// The joined keys are the subject and each row's category is the
    /// pattern, so a category of "veg" matches the key "vegetables".
    pub fn filter_posts<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<PostRow>> {
        let pattern = alternation(keys);
        self.query_posts(
            &format!("{POST_SELECT} WHERE u.active = TRUE AND ?1 REGEXP p.category"),
            params![pattern],
        )
    }

    fn query_posts(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<PostRow>> {
        let mut stmt = self.conn.prepare(sql)?;

        let rows = stmt
            .query_map(params, post_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        post_id: row.get(0)?,
        user_id: row.get(1)?,
        price: row.get(2)?,
        quantity: row.get(3)?,
        unit: row.get(4)?,
        product: row.get(5)?,
        category: row.get(6)?,
        zip: row.get(7)?,
        description: row.get(8)?,
        owner_name: row.get(9)?,
        owner_email: row.get(10)?,
        owner_rating: row.get(11)?,
        owner_active: row.get(12)?,
        file_path: row.get(13)?,
    })
}
