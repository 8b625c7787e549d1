use anyhow::Result;

use super::OptionalExt;
use crate::Session;
use crate::models::PhotoRow;

impl Session {
    /// Insert the empty photo row for a new post and read it back as stored.
    pub fn init_photo(&self, id: i64) -> Result<PhotoRow> {
        self.conn.execute("INSERT INTO photo (id) VALUES (?1)", [id])?;

        let row = self.conn.query_row(
            "SELECT id, file_path FROM photo WHERE id = ?1",
            [id],
            |row| {
                Ok(PhotoRow {
                    id: row.get(0)?,
                    file_path: row.get(1)?,
                })
            },
        )?;

        Ok(row)
    }

    pub fn find_photo_by_id(&self, id: i64) -> Result<Option<PhotoRow>> {
        self.conn
            .query_row(
                "SELECT id, file_path FROM photo WHERE id = ?1",
                [id],
                |row| {
                    Ok(PhotoRow {
                        id: row.get(0)?,
                        file_path: row.get(1)?,
                    })
                },
            )
            .optional()
    }

    /// Record where the uploaded file for a photo was stored.
    pub fn set_photo(&self, id: i64, file_path: &str) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE photo SET file_path = ?1 WHERE id = ?2",
            rusqlite::params![file_path, id],
        )?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::NewPost;
    use crate::test_utils::{seed_post, seed_user, temp_session};

    #[test]
    fn init_returns_empty_row_keyed_by_post() {
        let (_dir, s) = temp_session();
        let ada = seed_user(&s, "Ada");
        let created = s
            .create_post(&NewPost {
                user_id: ada,
                price: 1.0,
                quantity: 1,
                unit: "bunch",
                product: "Kale",
                category: "greens",
                zip: "97201",
                description: "",
            })
            .unwrap();

        let photo = s.init_photo(created.id).unwrap();
        assert_eq!(photo.id, created.id);
        assert_eq!(photo.file_path, None);
    }

    #[test]
    fn init_twice_is_an_error() {
        let (_dir, s) = temp_session();
        let ada = seed_user(&s, "Ada");
        let id = seed_post(&s, ada, "Kale", "greens");

        assert!(s.init_photo(id).is_err());
    }

    #[test]
    fn init_for_missing_post_fails_foreign_key() {
        let (_dir, s) = temp_session();

        let err = s.init_photo(999).unwrap_err();
        let sqlite = err.downcast_ref::<rusqlite::Error>().unwrap();
        assert_eq!(
            sqlite.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        );
    }

    #[test]
    fn set_then_reread() {
        let (_dir, s) = temp_session();
        let ada = seed_user(&s, "Ada");
        let id = seed_post(&s, ada, "Kale", "greens");

        assert_eq!(s.set_photo(id, "uploads/kale.jpg").unwrap(), 1);

        let photo = s.find_photo_by_id(id).unwrap().unwrap();
        assert_eq!(photo.file_path.as_deref(), Some("uploads/kale.jpg"));

        let post = s.find_post_by_id(id).unwrap().unwrap();
        assert_eq!(post.file_path.as_deref(), Some("uploads/kale.jpg"));
    }

    #[test]
    fn set_missing_photo_affects_nothing() {
        let (_dir, s) = temp_session();
        assert_eq!(s.set_photo(5, "nowhere.jpg").unwrap(), 0);
    }
}
