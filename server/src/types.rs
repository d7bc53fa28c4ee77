use serde::{Deserialize, Serialize};
use std::fmt::Display;
use time::OffsetDateTime;
use todoauth::Principal;
use uuid::Uuid;

//--------------------------------------------------------------------------------------------------
// New types
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn generate() -> Self {
        TodoId(Uuid::new_v4())
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------------------------------------------------------------------
// TODO item, keyed by owner and ID
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: Principal,
    pub todo_id: TodoId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

// Make sure new items are only assembled here, so the owner always comes from the caller
impl TodoItem {
    pub fn new(user_id: Principal, name: String, due_date: String) -> Self {
        TodoItem {
            user_id,
            todo_id: TodoId::generate(),
            created_at: OffsetDateTime::now_utc(),
            name,
            due_date,
            done: false,
        }
    }
}

/// Fields replaced by an update; all three are written together
#[derive(Debug)]
pub struct TodoChangeset {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

//--------------------------------------------------------------------------------------------------
