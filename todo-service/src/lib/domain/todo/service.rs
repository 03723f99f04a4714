use std::sync::Arc;

use async_trait::async_trait;
use auth::OwnershipScope;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoCommand;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for todo operations.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn list_todos(&self, scope: &OwnershipScope) -> Result<Vec<Todo>, TodoError> {
        self.repository.find_all(scope).await
    }

    async fn get_todo(&self, scope: &OwnershipScope, id: &TodoId) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id(scope, id)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))
    }

    async fn create_todo(
        &self,
        owner_id: &UserId,
        command: TodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = NewTodo {
            title: command.title,
            description: command.description,
            priority: command.priority,
            complete: command.complete,
            owner_id: *owner_id,
        };

        let created = self.repository.create(todo).await?;
        tracing::debug!(todo_id = %created.id, owner_id = %created.owner_id, "Todo created");

        Ok(created)
    }

    async fn update_todo(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
        command: TodoCommand,
    ) -> Result<Todo, TodoError> {
        self.repository
            .update(scope, id, &command)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))
    }

    async fn delete_todo(&self, scope: &OwnershipScope, id: &TodoId) -> Result<(), TodoError> {
        if self.repository.delete(scope, id).await? {
            Ok(())
        } else {
            Err(TodoError::NotFound(id.to_string()))
        }
    }
}
