//! Fixtures shared by the unit tests.

use tempfile::TempDir;

use crate::models::NewPost;
use crate::{Database, DbConfig, Session};

/// Fresh on-disk database. Keep the `TempDir` alive for the test's duration.
pub fn temp_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("market.db"))).unwrap();
    (dir, db)
}

pub fn temp_session() -> (TempDir, Session) {
    let (dir, db) = temp_db();
    let session = db.session().unwrap();
    (dir, session)
}

/// Insert an active user and return its id.
pub fn seed_user(session: &Session, name: &str) -> i64 {
    let email = format!("{}@example.com", name.to_lowercase());
    session.create_user(name, &email, "hashed", 4.0, true).unwrap();
    session.find_user_by_email(&email).unwrap().unwrap().id
}

/// Insert a post with its empty photo row and return the post id.
pub fn seed_post(session: &Session, user_id: i64, product: &str, category: &str) -> i64 {
    let created = session
        .create_post(&NewPost {
            user_id,
            price: 3.5,
            quantity: 10,
            unit: "lb",
            product,
            category,
            zip: "97201",
            description: "Picked this morning",
        })
        .unwrap();
    session.init_photo(created.id).unwrap();
    created.id
}
