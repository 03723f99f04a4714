use async_trait::async_trait;
use auth::OwnershipScope;
use sqlx::PgPool;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Description;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Title;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoCommand;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;

// `$n::BIGINT IS NULL` disables the owner filter for unrestricted scopes.
const OWNER_FILTER: &str = "($1::BIGINT IS NULL OR owner_id = $1)";

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    priority: i16,
    complete: bool,
    owner_id: i64,
}

impl TryFrom<TodoRow> for Todo {
    type Error = TodoError;

    fn try_from(r: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: TodoId(r.id),
            title: Title::new(r.title)?,
            description: Description::new(r.description)?,
            priority: Priority::new(i64::from(r.priority))?,
            complete: r.complete,
            owner_id: UserId(r.owner_id),
        })
    }
}

fn database_error(e: sqlx::Error) -> TodoError {
    TodoError::DatabaseError(e.to_string())
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn find_all(&self, scope: &OwnershipScope) -> Result<Vec<Todo>, TodoError> {
        let query = format!(
            "SELECT id, title, description, priority, complete, owner_id \
             FROM todos WHERE {} ORDER BY id",
            OWNER_FILTER
        );

        let rows = sqlx::query_as::<_, TodoRow>(&query)
            .bind(scope.owner_filter())
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn find_by_id(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
    ) -> Result<Option<Todo>, TodoError> {
        let query = format!(
            "SELECT id, title, description, priority, complete, owner_id \
             FROM todos WHERE {} AND id = $2",
            OWNER_FILTER
        );

        let row = sqlx::query_as::<_, TodoRow>(&query)
            .bind(scope.owner_filter())
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Todo::try_from).transpose()
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, description, priority, complete, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, priority, complete, owner_id
            "#,
        )
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.priority.value())
        .bind(todo.complete)
        .bind(todo.owner_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Todo::try_from(row)
    }

    async fn update(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
        command: &TodoCommand,
    ) -> Result<Option<Todo>, TodoError> {
        let query = format!(
            "UPDATE todos SET title = $3, description = $4, priority = $5, complete = $6 \
             WHERE {} AND id = $2 \
             RETURNING id, title, description, priority, complete, owner_id",
            OWNER_FILTER
        );

        let row = sqlx::query_as::<_, TodoRow>(&query)
            .bind(scope.owner_filter())
            .bind(id.0)
            .bind(command.title.as_str())
            .bind(command.description.as_str())
            .bind(command.priority.value())
            .bind(command.complete)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Todo::try_from).transpose()
    }

    async fn delete(&self, scope: &OwnershipScope, id: &TodoId) -> Result<bool, TodoError> {
        let query = format!("DELETE FROM todos WHERE {} AND id = $2", OWNER_FILTER);

        let result = sqlx::query(&query)
            .bind(scope.owner_filter())
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
