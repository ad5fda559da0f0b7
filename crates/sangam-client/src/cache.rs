//! Process-wide query cache.
//!
//! A keyed store of the last-fetched server state.  Views render from it,
//! polls overwrite it (last fetch wins), and mutations invalidate it.
//! Because keys are shared process-wide, one view's refetch is immediately
//! visible to every other view holding the same key; gating relies on this
//! for the `CurrentSubscription` key.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use sangam_shared::ChatId;

const CHANGE_CAPACITY: usize = 256;

/// Cache keys, one per server resource a view can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    OwnProfile,
    SearchResults,
    ChatList,
    Conversation(ChatId),
    TypingState(ChatId),
    MediaGallery(ChatId),
    Notifications,
    NotificationPreferences,
    ReceivedInterests,
    SentInterests,
    InterestHistory,
    Favorites,
    CurrentSubscription,
    SubscriptionHistory,
}

struct CacheEntry {
    value: serde_json::Value,
    fetched_at: DateTime<Utc>,
}

/// Keyed key→value store with explicit invalidation and change
/// notifications.
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    changed_tx: broadcast::Sender<QueryKey>,
}

impl QueryCache {
    pub fn new() -> Self {
        let (changed_tx, _rx) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            entries: Mutex::new(HashMap::new()),
            changed_tx,
        }
    }

    /// Store fetched state under a key, replacing whatever was there.
    pub fn put<T: Serialize>(&self, key: QueryKey, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                // a cache entry that cannot encode is dropped, not fatal
                tracing::warn!(?key, error = %e, "failed to encode cache entry");
                return;
            }
        };

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.clone(),
                CacheEntry {
                    value: json,
                    fetched_at: Utc::now(),
                },
            );
        }
        self.notify(key);
    }

    /// Read typed state back out of the cache.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// When the entry under a key was last fetched.
    pub fn fetched_at(&self, key: &QueryKey) -> Option<DateTime<Utc>> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).map(|e| e.fetched_at)
    }

    /// Drop a key and notify subscribers so they refetch.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        self.notify(key.clone());
    }

    /// Subscribe to change notifications (both puts and invalidations).
    pub fn subscribe(&self) -> broadcast::Receiver<QueryKey> {
        self.changed_tx.subscribe()
    }

    fn notify(&self, key: QueryKey) {
        if self.changed_tx.send(key).is_err() {
            debug!("cache change dropped, no subscribers");
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_round_trip() {
        let cache = QueryCache::new();
        cache.put(QueryKey::ChatList, &vec!["c1".to_string(), "c2".to_string()]);

        let chats: Vec<String> = cache.get(&QueryKey::ChatList).unwrap();
        assert_eq!(chats, vec!["c1", "c2"]);
        assert!(cache.fetched_at(&QueryKey::ChatList).is_some());
    }

    #[test]
    fn last_fetch_wins() {
        let cache = QueryCache::new();
        cache.put(QueryKey::SearchResults, &1u32);
        cache.put(QueryKey::SearchResults, &2u32);
        assert_eq!(cache.get::<u32>(&QueryKey::SearchResults), Some(2));
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = QueryCache::new();
        cache.put(QueryKey::Favorites, &42u32);
        cache.invalidate(&QueryKey::Favorites);
        assert_eq!(cache.get::<u32>(&QueryKey::Favorites), None);
    }

    #[tokio::test]
    async fn subscribers_see_puts_and_invalidations() {
        let cache = QueryCache::new();
        let mut rx = cache.subscribe();

        cache.put(QueryKey::Notifications, &0u32);
        cache.invalidate(&QueryKey::Notifications);

        assert_eq!(rx.recv().await.unwrap(), QueryKey::Notifications);
        assert_eq!(rx.recv().await.unwrap(), QueryKey::Notifications);
    }

    #[test]
    fn per_chat_keys_are_distinct() {
        let cache = QueryCache::new();
        cache.put(QueryKey::Conversation(ChatId("c1".into())), &1u32);
        cache.put(QueryKey::Conversation(ChatId("c2".into())), &2u32);

        assert_eq!(
            cache.get::<u32>(&QueryKey::Conversation(ChatId("c1".into()))),
            Some(1)
        );
        assert_eq!(
            cache.get::<u32>(&QueryKey::Conversation(ChatId("c2".into()))),
            Some(2)
        );
    }
}
