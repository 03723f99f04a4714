use serde::Deserialize;
use serde::Serialize;

use crate::domain::todo::models::Description;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Title;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoCommand;
use crate::domain::todo::models::TodoId;
use crate::inbound::http::handlers::ApiError;
use crate::todo::errors::TodoError;

pub mod create_todo;
pub mod delete_todo;
pub mod get_todo;
pub mod list_todos;
pub mod update_todo;

pub use create_todo::create_todo;
pub use delete_todo::delete_todo;
pub use get_todo::get_todo;
pub use list_todos::list_todos;
pub use update_todo::update_todo;

/// HTTP request body shared by todo create and full update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoRequest {
    title: String,
    description: String,
    priority: i64,
    #[serde(default)]
    complete: bool,
}

impl TodoRequest {
    fn try_into_command(self) -> Result<TodoCommand, TodoError> {
        Ok(TodoCommand {
            title: Title::new(self.title)?,
            description: Description::new(self.description)?,
            priority: Priority::new(self.priority)?,
            complete: self.complete,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i16,
    pub complete: bool,
    pub owner_id: i64,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.0,
            title: todo.title.as_str().to_string(),
            description: todo.description.as_str().to_string(),
            priority: todo.priority.value(),
            complete: todo.complete,
            owner_id: todo.owner_id.0,
        }
    }
}

fn parse_todo_id(raw: &str) -> Result<TodoId, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(TodoId(id)),
        _ => Err(ApiError::UnprocessableEntity(format!(
            "Invalid todo id: {}",
            raw
        ))),
    }
}
