use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: Option<i32>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: Option<i32>,
    pub price: f64,
}

/// Partial update; `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub published_year: Option<i32>,
    pub price: Option<f64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.published_year.is_none()
            && self.price.is_none()
    }
}

impl From<NewBook> for Book {
    fn from(n: NewBook) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: n.title,
            author: n.author,
            genre: n.genre,
            published_year: n.published_year,
            price: n.price,
            created_at: Utc::now(),
        }
    }
}

impl Book {
    /// Overlay `patch` on this record. `id` and `created_at` never change.
    pub fn merged(&self, patch: BookPatch) -> Self {
        Self {
            id: self.id,
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            author: patch.author.unwrap_or_else(|| self.author.clone()),
            genre: patch.genre.unwrap_or_else(|| self.genre.clone()),
            published_year: patch.published_year.or(self.published_year),
            price: patch.price.unwrap_or(self.price),
            created_at: self.created_at,
        }
    }
}

/// Stored account. Deliberately not `Serialize`: the hash never leaves the process.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// User representation safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
        }
    }
}
