//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// Clones share the same underlying parties.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    parties: Arc<RwLock<Vec<Party>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            parties: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> PartyResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> PartyResult<RwLockReadGuard<'_, Vec<Party>>> {
        self.parties
            .read()
            .map_err(|e| PartyError::Storage(e.to_string()))
    }

    fn write(&self) -> PartyResult<RwLockWriteGuard<'_, Vec<Party>>> {
        self.parties
            .write()
            .map_err(|e| PartyError::Storage(e.to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PartyStorage for MemoryStorage {
    async fn list_parties(&self) -> PartyResult<Vec<Party>> {
        Ok(self.read()?.clone())
    }

    async fn get_party(&self, party_id: &str) -> PartyResult<Option<Party>> {
        Ok(self.read()?.iter().find(|p| p.id == party_id).cloned())
    }

    async fn save_party(&mut self, party: &Party) -> PartyResult<()> {
        let mut parties = self.write()?;
        if parties.iter().any(|p| p.id == party.id) {
            return Err(PartyError::Storage(format!(
                "Party with ID '{}' already exists",
                party.id
            )));
        }
        parties.push(party.clone());
        Ok(())
    }

    async fn update_party(&mut self, party: &Party) -> PartyResult<()> {
        let mut parties = self.write()?;
        match parties.iter_mut().find(|p| p.id == party.id) {
            Some(existing) => {
                *existing = party.clone();
                Ok(())
            }
            None => Err(PartyError::PartyNotFound(party.id.clone())),
        }
    }

    async fn delete_party(&mut self, party_id: &str) -> PartyResult<()> {
        let mut parties = self.write()?;
        let before = parties.len();
        parties.retain(|p| p.id != party_id);
        if parties.len() == before {
            Err(PartyError::PartyNotFound(party_id.to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn party(id: &str, name: &str) -> Party {
        Party::new(
            id.to_string(),
            name.to_string(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_save_list_and_get() {
        let mut storage = MemoryStorage::new();
        storage.save_party(&party("p1", "Picnic")).await.unwrap();
        storage.save_party(&party("p2", "Road trip")).await.unwrap();

        let names: Vec<String> = storage
            .list_parties()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Picnic", "Road trip"]);

        let found = storage.get_party("p2").await.unwrap().unwrap();
        assert_eq!(found.name, "Road trip");
        assert!(storage.get_party("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let mut storage = MemoryStorage::new();
        storage.save_party(&party("p1", "Picnic")).await.unwrap();
        assert!(storage.save_party(&party("p1", "Again")).await.is_err());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_party() {
        let mut storage = MemoryStorage::new();
        storage.save_party(&party("p1", "Picnic")).await.unwrap();

        let mut edited = party("p1", "Beach picnic");
        edited.members.push(Member::new("m1", "Alice"));
        storage.update_party(&edited).await.unwrap();

        assert_eq!(storage.get_party("p1").await.unwrap(), Some(edited));
        assert!(matches!(
            storage.update_party(&party("nope", "x")).await,
            Err(PartyError::PartyNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let mut storage = MemoryStorage::new();
        storage.save_party(&party("p1", "Picnic")).await.unwrap();
        storage.save_party(&party("p2", "Road trip")).await.unwrap();

        storage.delete_party("p1").await.unwrap();
        assert!(matches!(
            storage.delete_party("p1").await,
            Err(PartyError::PartyNotFound(_))
        ));

        // Clones share data
        let handle = storage.clone();
        handle.clear().unwrap();
        assert!(storage.list_parties().await.unwrap().is_empty());
    }
}
