//! Local JSON-file storage
//!
//! Keeps every party in a single JSON array on disk, in the same record
//! shape the remote store uses. The file is read on every call and
//! rewritten on every mutation.
//!
//! File access is synchronous `std::fs` inside the async methods, so a
//! call blocks its executor thread for the length of the read or write.
//! Meant for single-user local data, not for shared servers.

use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::traits::*;
use crate::types::*;

/// File-backed storage for a single local user
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Use `path` as the backing file. It is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PartyResult<Vec<Party>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to read parties");
                return Err(PartyError::Storage(e.to_string()));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to parse parties");
            PartyError::Storage(format!("Corrupt party file: {}", e))
        })
    }

    fn store(&self, parties: &[Party]) -> PartyResult<()> {
        let contents = serde_json::to_string_pretty(parties)?;
        fs::write(&self.path, contents).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to write parties");
            PartyError::Storage(e.to_string())
        })
    }
}

#[async_trait]
impl PartyStorage for JsonFileStorage {
    async fn list_parties(&self) -> PartyResult<Vec<Party>> {
        self.load()
    }

    async fn get_party(&self, party_id: &str) -> PartyResult<Option<Party>> {
        Ok(self.load()?.into_iter().find(|p| p.id == party_id))
    }

    async fn save_party(&mut self, party: &Party) -> PartyResult<()> {
        let mut parties = self.load()?;
        if parties.iter().any(|p| p.id == party.id) {
            return Err(PartyError::Storage(format!(
                "Party with ID '{}' already exists",
                party.id
            )));
        }
        parties.push(party.clone());
        self.store(&parties)
    }

    async fn update_party(&mut self, party: &Party) -> PartyResult<()> {
        let mut parties = self.load()?;
        let existing = parties
            .iter_mut()
            .find(|p| p.id == party.id)
            .ok_or_else(|| PartyError::PartyNotFound(party.id.clone()))?;
        *existing = party.clone();
        self.store(&parties)
    }

    async fn delete_party(&mut self, party_id: &str) -> PartyResult<()> {
        let mut parties = self.load()?;
        let before = parties.len();
        parties.retain(|p| p.id != party_id);
        if parties.len() == before {
            return Err(PartyError::PartyNotFound(party_id.to_string()));
        }
        self.store(&parties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("party-ledger-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let storage = JsonFileStorage::new(temp_path());
        assert!(storage.list_parties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let path = temp_path();
        let mut storage = JsonFileStorage::new(&path);

        let mut party = Party::new(
            "p1".to_string(),
            "Housewarming".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
        );
        party.members = vec![Member::new("a", "Alice"), Member::new("b", "Bob")];
        party.expenses.push(Expense::new(
            "e1".to_string(),
            "Drinks".to_string(),
            BigDecimal::from(40),
            "a".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            Split::Equal(vec!["a".to_string(), "b".to_string()]),
        ));
        storage.save_party(&party).await.unwrap();

        // A second handle sees what the first wrote
        let reopened = JsonFileStorage::new(&path);
        assert_eq!(reopened.get_party("p1").await.unwrap(), Some(party.clone()));

        party.name = "Housewarming 2".to_string();
        storage.update_party(&party).await.unwrap();
        assert_eq!(
            reopened.get_party("p1").await.unwrap().unwrap().name,
            "Housewarming 2"
        );

        storage.delete_party("p1").await.unwrap();
        assert!(reopened.list_parties().await.unwrap().is_empty());

        fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_rewrite_keeps_stored_numbers() {
        let path = temp_path();
        let written_elsewhere = r#"[{
            "id": "p1",
            "name": "Picnic",
            "date": "2024-06-01",
            "friends": [{"id": "a", "name": "Alice"}, {"id": "b", "name": "Bob"}],
            "expenses": [{
                "id": "e1",
                "description": "Fruit",
                "amount": 33.33,
                "paidById": "a",
                "date": "2024-06-01",
                "splitType": "by_amount",
                "splitBetween": [
                    {"friendId": "a", "amount": 20.83},
                    {"friendId": "b", "amount": 12.5}
                ]
            }]
        }]"#;
        fs::write(&path, written_elsewhere).unwrap();

        let mut storage = JsonFileStorage::new(&path);
        assert_eq!(storage.path(), path.as_path());

        let mut party = storage.get_party("p1").await.unwrap().unwrap();
        party.name = "Picnic (rain date)".to_string();
        storage.update_party(&party).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let expense = &raw[0]["expenses"][0];
        assert!(expense["amount"].is_number());
        assert_eq!(expense["amount"].to_string(), "33.33");
        assert_eq!(expense["splitBetween"][0]["amount"].to_string(), "20.83");
        assert_eq!(expense["splitBetween"][1]["amount"].to_string(), "12.5");

        fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_storage_error() {
        let path = temp_path();
        fs::write(&path, "{ definitely not parties").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(matches!(
            storage.list_parties().await,
            Err(PartyError::Storage(_))
        ));

        fs::remove_file(&path).ok();
    }
}
