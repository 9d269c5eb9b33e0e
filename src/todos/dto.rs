use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::todos::repo::Todo;

/// Request body for creating or updating a todo.
#[derive(Debug, Deserialize)]
pub struct TodoPayload {
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Serialize)]
pub struct ShowTodo {
    pub id: Uuid,
    pub title: String,
    pub desc: String,
    pub user_id: Uuid,
}

impl From<Todo> for ShowTodo {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            desc: t.desc,
            user_id: t.user_id,
        }
    }
}
