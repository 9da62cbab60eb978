//! Object types, query root and schema construction.

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, ID};

use super::scalars::Date;
use crate::db::{ChatRecord, ChatStore, MessageRecord};

/// Executable schema served on the GraphQL endpoint.
pub type ChatSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema with the store attached as context data.
pub fn build_schema(store: Arc<ChatStore>) -> ChatSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(store)
        .extension(Tracing)
        .finish()
}

/// A chat message.
pub struct Message(MessageRecord);

#[Object]
impl Message {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn created_at(&self) -> Date {
        Date(self.0.created_at)
    }
}

/// A chat conversation.
pub struct Chat(ChatRecord);

#[Object]
impl Chat {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn picture(&self) -> Option<&str> {
        self.0.picture.as_deref()
    }

    /// Most recent message; `null` when the chat has none or the id is dangling.
    async fn last_message(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Message>> {
        let store = ctx.data::<Arc<ChatStore>>()?;
        Ok(store.last_message_of(&self.0).cloned().map(Message))
    }
}

/// Query root.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every chat in the snapshot.
    async fn chats(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Chat>> {
        let store = ctx.data::<Arc<ChatStore>>()?;
        Ok(store.chats().iter().cloned().map(Chat).collect())
    }

    /// A single chat, `null` if unknown.
    async fn chat(&self, ctx: &Context<'_>, chat_id: ID) -> async_graphql::Result<Option<Chat>> {
        let store = ctx.data::<Arc<ChatStore>>()?;
        Ok(store.chat(&chat_id).cloned().map(Chat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> ChatSchema {
        build_schema(Arc::new(ChatStore::seeded()))
    }

    #[tokio::test]
    async fn chats_query_returns_seed_with_last_messages() {
        let response = schema()
            .execute("{ chats { id name lastMessage { id content createdAt } } }")
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        assert_eq!(data["chats"].as_array().unwrap().len(), 4);
        assert_eq!(
            data["chats"][0],
            json!({
                "id": "1",
                "name": "Ethan Gonzalez",
                "lastMessage": {
                    "id": "1",
                    "content": "You on your way?",
                    "createdAt": "2018-12-31T07:20:00Z"
                }
            })
        );
    }

    #[tokio::test]
    async fn chat_query_looks_up_by_id() {
        let response = schema()
            .execute(r#"{ chat(chatId: "3") { name picture } }"#)
            .await;
        let data = response.data.into_json().unwrap();
        assert_eq!(
            data,
            json!({
                "chat": {
                    "name": "Avery Stewart",
                    "picture": "https://randomuser.me/api/portraits/thumb/women/1.jpg"
                }
            })
        );
    }

    #[tokio::test]
    async fn unknown_chat_is_null() {
        let response = schema().execute(r#"{ chat(chatId: "42") { id } }"#).await;
        assert!(response.errors.is_empty());
        assert_eq!(response.data.into_json().unwrap(), json!({ "chat": null }));
    }

    #[tokio::test]
    async fn syntax_error_is_reported_in_errors() {
        let response = schema().execute("{ chats { id ").await;
        assert!(!response.errors.is_empty());
    }

    #[tokio::test]
    async fn empty_store_yields_empty_list() {
        let schema = build_schema(Arc::new(ChatStore::default()));
        let response = schema.execute("{ chats { id } }").await;
        assert_eq!(response.data.into_json().unwrap(), json!({ "chats": [] }));
    }

    #[test]
    fn sdl_exposes_date_scalar_and_chat_fields() {
        let sdl = schema().sdl();
        assert!(sdl.contains("scalar Date"));
        assert!(sdl.contains("lastMessage: Message"));
        assert!(sdl.contains("chat(chatId: ID!): Chat"));
    }
}
