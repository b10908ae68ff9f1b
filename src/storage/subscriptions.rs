//! Subscription repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{Subscription, SubscriptionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable subscription document
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SubscriptionData {
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

/// Repository for subscription persistence
pub struct SubscriptionRepository {
    path: PathBuf,
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
}

impl SubscriptionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            subscriptions: RwLock::new(HashMap::new()),
        }
    }

    /// Load subscriptions from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: SubscriptionData = read_json(&self.path)?;

        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        subscriptions.clear();
        for sub in file_data.subscriptions {
            subscriptions.insert(sub.id, sub);
        }

        Ok(())
    }

    /// Save subscriptions to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let file_data = SubscriptionData {
            subscriptions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a subscription by ID
    pub fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, FintrackError> {
        let subscriptions = self
            .subscriptions
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(subscriptions.get(&id).cloned())
    }

    /// Get all subscriptions ordered by next payment date
    pub fn get_all(&self) -> Result<Vec<Subscription>, FintrackError> {
        let subscriptions = self
            .subscriptions
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = subscriptions.values().cloned().collect();
        list.sort_by(|a, b| {
            a.next_payment_date
                .cmp(&b.next_payment_date)
                .then(a.id.cmp(&b.id))
        });
        Ok(list)
    }

    /// Insert or update a subscription
    pub fn upsert(&self, subscription: Subscription) -> Result<(), FintrackError> {
        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        subscriptions.insert(subscription.id, subscription);
        Ok(())
    }

    /// Delete a subscription. Returns whether it existed.
    pub fn delete(&self, id: SubscriptionId) -> Result<bool, FintrackError> {
        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(subscriptions.remove(&id).is_some())
    }

    /// Replace the whole set (bulk import)
    pub fn replace_all(&self, new_subscriptions: Vec<Subscription>) -> Result<(), FintrackError> {
        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        subscriptions.clear();
        for sub in new_subscriptions {
            subscriptions.insert(sub.id, sub);
        }
        Ok(())
    }

    /// Count subscriptions
    pub fn count(&self) -> Result<usize, FintrackError> {
        let subscriptions = self
            .subscriptions
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(subscriptions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingCycle, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SubscriptionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = SubscriptionRepository::new(temp_dir.path().join("subscriptions.json"));
        (temp_dir, repo)
    }

    fn sub(name: &str, day: u32) -> Subscription {
        Subscription::new(
            name,
            Money::from_cents(999),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            BillingCycle::Monthly,
        )
    }

    #[test]
    fn test_upsert_get_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let s = sub("Streaming", 15);
        let id = s.id;
        repo.upsert(s).unwrap();
        assert_eq!(repo.get(id).unwrap().unwrap().name, "Streaming");

        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_all_sorted_by_next_payment() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(sub("Late", 20)).unwrap();
        repo.upsert(sub("Early", 5)).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Early", "Late"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(sub("Gym", 1)).unwrap();
        repo.save().unwrap();

        let repo2 = SubscriptionRepository::new(temp_dir.path().join("subscriptions.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
    }
}
