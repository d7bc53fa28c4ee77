use crate::types::{TodoChangeset, TodoId, TodoItem};
use async_trait::async_trait;
use std::collections::HashMap;
use todoauth::Principal;
use tokio::sync::RwLock;

//--------------------------------------------------------------------------------------------------
// Data access for TODO items
//--------------------------------------------------------------------------------------------------

/// Every operation is scoped to the owning principal; an item is addressed by (owner, ID), so one
/// user can never read or modify another's items.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn get_todos(&self, user_id: &Principal) -> Result<Vec<TodoItem>, anyhow::Error>;

    async fn create_todo(&self, item: TodoItem) -> Result<TodoItem, anyhow::Error>;

    /// Returns `None` when the user has no item with that ID
    async fn update_todo(
        &self,
        user_id: &Principal,
        todo_id: TodoId,
        changeset: TodoChangeset,
    ) -> Result<Option<TodoItem>, anyhow::Error>;

    /// Returns whether an item was deleted
    async fn delete_todo(&self, user_id: &Principal, todo_id: TodoId)
        -> Result<bool, anyhow::Error>;
}

//--------------------------------------------------------------------------------------------------
// In-memory table
//--------------------------------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryTodoStore {
    items: RwLock<HashMap<(Principal, TodoId), TodoItem>>,
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn get_todos(&self, user_id: &Principal) -> Result<Vec<TodoItem>, anyhow::Error> {
        let items = self.items.read().await;
        let mut todos: Vec<TodoItem> = items
            .values()
            .filter(|item| &item.user_id == user_id)
            .cloned()
            .collect();
        todos.sort_by_key(|item| item.created_at);

        Ok(todos)
    }

    async fn create_todo(&self, item: TodoItem) -> Result<TodoItem, anyhow::Error> {
        let key = (item.user_id.clone(), item.todo_id);
        self.items.write().await.insert(key, item.clone());

        Ok(item)
    }

    async fn update_todo(
        &self,
        user_id: &Principal,
        todo_id: TodoId,
        changeset: TodoChangeset,
    ) -> Result<Option<TodoItem>, anyhow::Error> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(&(user_id.clone(), todo_id)) else {
            return Ok(None);
        };

        item.name = changeset.name;
        item.due_date = changeset.due_date;
        item.done = changeset.done;

        Ok(Some(item.clone()))
    }

    async fn delete_todo(
        &self,
        user_id: &Principal,
        todo_id: TodoId,
    ) -> Result<bool, anyhow::Error> {
        let removed = self.items.write().await.remove(&(user_id.clone(), todo_id));

        Ok(removed.is_some())
    }
}

//--------------------------------------------------------------------------------------------------
