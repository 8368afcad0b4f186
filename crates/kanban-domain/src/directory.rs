use std::collections::HashMap;

use crate::task::{ServerUser, UserId};

/// Bidirectional assignee lookup shared by the rendering and creation paths.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    names: HashMap<UserId, String>,
    ids: HashMap<String, UserId>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: &[ServerUser]) -> Self {
        let mut directory = Self::new();
        for user in users {
            let name = user
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| fallback_name(user.user_id));
            directory.insert(user.user_id, name);
        }
        directory
    }

    /// Adds or renames a user. A name shared by several users resolves to one
    /// of them, and renaming one never hides the others.
    pub fn insert(&mut self, id: UserId, name: String) {
        if let Some(previous) = self.names.insert(id, name.clone()) {
            let key = previous.to_lowercase();
            if self.ids.get(&key) == Some(&id) {
                self.ids.remove(&key);
                let namesake = self
                    .names
                    .iter()
                    .find(|(other, n)| **other != id && n.to_lowercase() == key)
                    .map(|(other, _)| *other);
                if let Some(other) = namesake {
                    self.ids.insert(key, other);
                }
            }
        }
        self.ids.insert(name.to_lowercase(), id);
    }

    pub fn replace(&mut self, other: UserDirectory) {
        *self = other;
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name_for(&self, id: UserId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Name shown on a card; unknown ids still render.
    pub fn display_name(&self, id: Option<UserId>) -> String {
        match id {
            Some(id) => self
                .name_for(id)
                .map(str::to_string)
                .unwrap_or_else(|| fallback_name(id)),
            None => "Unassigned".to_string(),
        }
    }

    /// Resolves what a user typed or picked as assignee.
    ///
    /// Matches display names case-insensitively, then the `User <id>` fallback
    /// form, then a bare numeric id.
    pub fn id_for(&self, input: &str) -> Option<UserId> {
        let key = input.trim().to_lowercase();
        if key.is_empty() || key == "unassigned" {
            return None;
        }
        if let Some(id) = self.ids.get(&key) {
            return Some(*id);
        }
        key.strip_prefix("user ")
            .unwrap_or(&key)
            .trim()
            .parse::<UserId>()
            .ok()
    }
}

fn fallback_name(id: UserId) -> String {
    format!("User {}", id)
}
