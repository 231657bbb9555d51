//! Typed repositories, one per collection. Each holds a clone of the shared
//! pool and is constructed once at startup (see `AppState::new`).

mod favorites;
mod meals;
mod orders;
mod payments;
mod requests;
mod reviews;
mod users;

pub use favorites::{Favorite, FavoriteRepo};
pub use meals::{Meal, MealRepo};
pub use orders::{Order, OrderRepo};
pub use payments::{Payment, PaymentRepo};
pub use requests::{RequestRepo, RoleRequest};
pub use reviews::{Review, ReviewRepo};
pub use users::{User, UserRepo};

use serde_json::{Map, Value};

/// Store-assigned identifier for a new document.
pub(crate) fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Server-stamped timestamp. RFC 3339 with a fixed UTC offset, so the text
/// column sorts chronologically.
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Drop keys the server owns from a client-supplied document, so they cannot
/// collide with the typed columns when the record is flattened back out.
pub(crate) fn strip_keys(extra: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        extra.remove(*key);
    }
}

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_sort_chronologically() {
        let earlier = now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = now();
        assert!(later > earlier);
    }

    #[test]
    fn test_strip_keys_removes_server_owned_fields() {
        let mut doc = Map::new();
        doc.insert("role".into(), Value::String("admin".into()));
        doc.insert("name".into(), Value::String("Amina".into()));
        strip_keys(&mut doc, &["role", "status"]);
        assert!(!doc.contains_key("role"));
        assert!(doc.contains_key("name"));
    }
}
