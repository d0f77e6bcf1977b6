use crate::db::models::User;
use uuid::Uuid;

/// In-memory account list. Usernames are unique.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: Vec<User>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when the username is already taken.
    pub fn insert(&mut self, username: String, password_hash: String) -> Option<User> {
        if self.users.iter().any(|u| u.username == username) {
            return None;
        }
        let user = User {
            id: Uuid::new_v4(),
            username,
            password_hash,
        };
        self.users.push(user.clone());
        Some(user)
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.iter().find(|u| u.username == username).cloned()
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }
}
