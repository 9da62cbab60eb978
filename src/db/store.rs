//! Read-only chat snapshot.

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use super::types::{ChatRecord, MessageRecord};

/// Reference instant the seed message timestamps are offset from.
const SEED_EPOCH: OffsetDateTime = datetime!(2019-01-01 0:00 UTC);

/// Immutable collection of chats and messages.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it.
#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    chats: Vec<ChatRecord>,
    messages: Vec<MessageRecord>,
}

impl ChatStore {
    /// Create a store from explicit records.
    pub fn new(chats: Vec<ChatRecord>, messages: Vec<MessageRecord>) -> Self {
        Self { chats, messages }
    }

    /// The default four-chat snapshot.
    pub fn seeded() -> Self {
        let message = |id: &str, content: &str, minutes_ago: i64| MessageRecord {
            id: id.to_string(),
            content: content.to_string(),
            created_at: SEED_EPOCH - Duration::minutes(minutes_ago),
        };
        let chat = |id: &str, name: &str, picture: &str, last_message: &str| ChatRecord {
            id: id.to_string(),
            name: name.to_string(),
            picture: Some(picture.to_string()),
            last_message: Some(last_message.to_string()),
        };

        let messages = vec![
            message("1", "You on your way?", 1_000),
            message("2", "Hey, it's me", 2_000),
            message("3", "I should buy a boat", 24_000),
            message("4", "This is wicked good ice cream.", 336_000),
        ];

        let chats = vec![
            chat(
                "1",
                "Ethan Gonzalez",
                "https://randomuser.me/api/portraits/thumb/men/1.jpg",
                "1",
            ),
            chat(
                "2",
                "Bryan Wallace",
                "https://randomuser.me/api/portraits/thumb/men/2.jpg",
                "2",
            ),
            chat(
                "3",
                "Avery Stewart",
                "https://randomuser.me/api/portraits/thumb/women/1.jpg",
                "3",
            ),
            chat(
                "4",
                "Katie Peterson",
                "https://randomuser.me/api/portraits/thumb/women/2.jpg",
                "4",
            ),
        ];

        Self::new(chats, messages)
    }

    /// All chats in insertion order.
    pub fn chats(&self) -> &[ChatRecord] {
        &self.chats
    }

    /// Look up a chat by id.
    pub fn chat(&self, id: &str) -> Option<&ChatRecord> {
        self.chats.iter().find(|c| c.id == id)
    }

    /// All messages in insertion order.
    pub fn messages(&self) -> &[MessageRecord] {
        &self.messages
    }

    /// Look up a message by id.
    pub fn message(&self, id: &str) -> Option<&MessageRecord> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Resolve the last message of a chat. Dangling ids resolve to `None`.
    pub fn last_message_of(&self, chat: &ChatRecord) -> Option<&MessageRecord> {
        chat.last_message.as_deref().and_then(|id| self.message(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_store_has_four_chats_in_order() {
        let store = ChatStore::seeded();
        let names: Vec<&str> = store.chats().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Ethan Gonzalez", "Bryan Wallace", "Avery Stewart", "Katie Peterson"]
        );
    }

    #[test]
    fn every_seeded_chat_resolves_its_last_message() {
        let store = ChatStore::seeded();
        for chat in store.chats() {
            let message = store.last_message_of(chat).expect("last message");
            assert_eq!(Some(message.id.as_str()), chat.last_message.as_deref());
        }
    }

    #[test]
    fn seed_timestamps_precede_epoch() {
        let store = ChatStore::seeded();
        let first = store.message("1").unwrap();
        assert_eq!(first.created_at, datetime!(2018-12-31 7:20 UTC));
        assert!(store.messages().iter().all(|m| m.created_at < SEED_EPOCH));
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        let store = ChatStore::seeded();
        assert!(store.chat("99").is_none());
        assert!(store.message("99").is_none());
    }

    #[test]
    fn dangling_last_message_is_none() {
        let store = ChatStore::new(
            vec![ChatRecord {
                id: "1".into(),
                name: "Solo".into(),
                picture: None,
                last_message: Some("missing".into()),
            }],
            Vec::new(),
        );
        let chat = store.chat("1").unwrap();
        assert!(store.last_message_of(chat).is_none());
    }

    #[test]
    fn records_serialize_camel_case() {
        let store = ChatStore::seeded();
        let json = serde_json::to_value(store.chat("1").unwrap()).unwrap();
        assert_eq!(json["lastMessage"], "1");

        let json = serde_json::to_value(store.message("1").unwrap()).unwrap();
        assert_eq!(json["createdAt"], "2018-12-31T07:20:00Z");
    }
}
