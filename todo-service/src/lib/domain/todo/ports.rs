use async_trait::async_trait;
use auth::OwnershipScope;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoCommand;
use crate::domain::todo::models::TodoId;
use crate::domain::user::models::UserId;

/// Port for todo domain service operations.
///
/// Every operation on existing todos takes the caller's ownership scope.
/// Todos outside the scope are indistinguishable from missing ones.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// List todos visible in scope.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self, scope: &OwnershipScope) -> Result<Vec<Todo>, TodoError>;

    /// Retrieve a todo visible in scope.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or is outside the scope
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, scope: &OwnershipScope, id: &TodoId) -> Result<Todo, TodoError>;

    /// Create a todo owned by `owner_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(&self, owner_id: &UserId, command: TodoCommand)
        -> Result<Todo, TodoError>;

    /// Replace the content of a todo visible in scope. The owner never changes.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or is outside the scope
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
        command: TodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Delete a todo visible in scope.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist or is outside the scope
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, scope: &OwnershipScope, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todos, filtered by ownership scope.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn find_all(&self, scope: &OwnershipScope) -> Result<Vec<Todo>, TodoError>;

    async fn find_by_id(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
    ) -> Result<Option<Todo>, TodoError>;

    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    /// Returns `None` when no todo matched the id within the scope.
    async fn update(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
        command: &TodoCommand,
    ) -> Result<Option<Todo>, TodoError>;

    /// Returns `false` when no todo matched the id within the scope.
    async fn delete(&self, scope: &OwnershipScope, id: &TodoId) -> Result<bool, TodoError>;
}
