//! Concurrency-safe mapping from display name to client.

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use tokio::sync::Mutex;

use super::entity::Client;

/// Registry of the clients currently in a room.
///
/// Every access goes through one mutex, so a membership check and the
/// insert that follows it cannot interleave with another join, a leave or
/// a broadcast snapshot. The lock is never held across a transport send.
#[derive(Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<String, Arc<Client>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `client` unless its name is already taken.
    ///
    /// On collision the client is handed back untouched.
    pub async fn register(&self, client: Client) -> Result<Arc<Client>, Client> {
        let mut clients = self.clients.lock().await;
        match clients.entry(client.name().as_str().to_string()) {
            Entry::Occupied(_) => Err(client),
            Entry::Vacant(slot) => {
                let client = Arc::new(client);
                slot.insert(client.clone());
                Ok(client)
            }
        }
    }

    /// Remove the client registered under `name`, if any.
    pub async fn remove(&self, name: &str) -> Option<Arc<Client>> {
        self.clients.lock().await.remove(name)
    }

    /// Copy of the current membership, taken under the lock.
    pub async fn snapshot(&self) -> Vec<Arc<Client>> {
        self.clients.lock().await.values().cloned().collect()
    }

    /// Registered names, sorted for stable output.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.clients.lock().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.clients.lock().await.contains_key(name)
    }

    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Weak;

    use super::*;
    use crate::domain::{DisplayName, transport::testing::RecordingSink};

    fn client(name: &str) -> Client {
        Client::new(DisplayName::from(name), RecordingSink::new().boxed(), Weak::new())
    }

    #[tokio::test]
    async fn test_register_success() {
        // テスト項目: 未使用の名前なら登録できる
        // given (前提条件):
        let registry = ClientRegistry::new();

        // when (操作):
        let result = registry.register(client("alice")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(registry.contains("alice").await);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_returns_client_back() {
        // テスト項目: 名前が重複すると登録されず、クライアントが返される
        // given (前提条件):
        let registry = ClientRegistry::new();
        let first = registry.register(client("alice")).await.unwrap();

        // when (操作):
        let result = registry.register(client("alice")).await;

        // then (期待する結果):
        let rejected = result.err().expect("duplicate must be rejected");
        assert_eq!(rejected.name().as_str(), "alice");
        assert_eq!(registry.len().await, 1);
        let snapshot = registry.snapshot().await;
        assert!(Arc::ptr_eq(&snapshot[0], &first));
    }

    #[tokio::test]
    async fn test_remove_twice_is_harmless() {
        // テスト項目: 同じ名前を 2 回削除しても状態は壊れない
        // given (前提条件):
        let registry = ClientRegistry::new();
        registry.register(client("alice")).await.unwrap();
        registry.register(client("bob")).await.unwrap();

        // when (操作):
        let first = registry.remove("alice").await;
        let second = registry.remove("alice").await;

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(registry.names().await, vec!["bob"]);
    }

    #[tokio::test]
    async fn test_names_are_sorted() {
        // テスト項目: 名前一覧はソートされている
        let registry = ClientRegistry::new();
        for name in ["charlie", "alice", "bob"] {
            registry.register(client(name)).await.unwrap();
        }

        assert_eq!(registry.names().await, vec!["alice", "bob", "charlie"]);
    }

    #[tokio::test]
    async fn test_name_can_be_reused_after_removal() {
        // テスト項目: 削除後は同じ名前で再登録できる
        let registry = ClientRegistry::new();
        registry.register(client("alice")).await.unwrap();
        registry.remove("alice").await;

        let result = registry.register(client("alice")).await;

        assert!(result.is_ok());
        assert!(!registry.is_empty().await);
    }
}
