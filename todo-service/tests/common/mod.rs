#![allow(dead_code)]

pub mod db;

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::HashingCost;
use auth::Identity;
use auth::OwnershipScope;
use auth::PasswordHasher;
use auth::Role;
use auth::SigningKey;
use auth::TokenIssuer;
use auth::TokenValidator;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use todo_service::domain::todo::errors::TodoError;
use todo_service::domain::todo::models::NewTodo;
use todo_service::domain::todo::models::Todo;
use todo_service::domain::todo::models::TodoCommand;
use todo_service::domain::todo::models::TodoId;
use todo_service::domain::todo::ports::TodoRepository;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::errors::UserError;
use todo_service::domain::user::models::NewUser;
use todo_service::domain::user::models::PhoneNumber;
use todo_service::domain::user::models::User;
use todo_service::domain::user::models::UserId;
use todo_service::domain::user::ports::UserRepository;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::inbound::http::router::AuthCookie;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const COOKIE_NAME: &str = "access_token";
pub const PASSWORD: &str = "secret123";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub todos: Arc<InMemoryTodoRepository>,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let signing_key = SigningKey::hs256(TEST_SECRET.as_bytes()).expect("Invalid test key");
        let password_hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Invalid test hashing cost");

        let users = Arc::new(InMemoryUserRepository::default());
        let todos = Arc::new(InMemoryTodoRepository::default());

        let user_service = Arc::new(
            UserService::new(
                Arc::clone(&users),
                password_hasher,
                TokenIssuer::new(signing_key.clone()),
                Duration::minutes(20),
            )
            .expect("Failed to create user service"),
        );
        let todo_service = Arc::new(TodoService::new(Arc::clone(&todos)));
        let token_validator = Arc::new(TokenValidator::new(signing_key.clone()));

        let auth_cookie = AuthCookie {
            name: COOKIE_NAME.to_string(),
            secure: false,
            max_age: Duration::minutes(20),
        };

        let router = create_router(user_service, todo_service, token_validator, auth_cookie);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            todos,
            token_issuer: TokenIssuer::new(signing_key),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Client that keeps cookies between requests, like a browser
    pub fn cookie_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a user with the shared test password and return the response data
    pub async fn register(&self, username: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "first_name": "Test",
                "last_name": "User",
                "password": PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in through the token endpoint and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn register_and_login(&self, username: &str) -> (i64, String) {
        let user = self.register(username).await;
        let token = self.login(username, PASSWORD).await;
        (user["id"].as_i64().unwrap(), token)
    }

    /// Create a todo as the token's owner and return its id
    pub async fn create_todo(&self, token: &str, title: &str) -> i64 {
        let response = self
            .post_authenticated("/api/todos", token)
            .json(&json!({
                "title": title,
                "description": "Need to learn everyday",
                "priority": 4,
                "complete": false,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Issue a token directly, bypassing login
    pub fn issue_token(&self, user_id: i64, username: &str, role: Role, ttl: Duration) -> String {
        self.token_issuer
            .issue_at(&Identity::new(user_id, username, role), ttl, Utc::now())
            .expect("Failed to issue token")
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn set_role(&self, username: &str, role: Role) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.username.as_str() == username) {
            user.role = role;
        }
    }

    pub fn set_active(&self, username: &str, is_active: bool) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.username.as_str() == username) {
            user.is_active = is_active;
        }
    }

    fn update<F>(&self, id: &UserId, apply: F) -> Result<(), UserError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or(UserError::NotFound(id.to_string()))?;
        apply(user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            role: user.role,
            phone_number: user.phone_number,
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserError> {
        self.update(id, |u| u.password_hash = password_hash.to_string())
    }

    async fn update_phone_number(
        &self,
        id: &UserId,
        phone_number: &PhoneNumber,
    ) -> Result<(), UserError> {
        self.update(id, |u| u.phone_number = Some(phone_number.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: Mutex<Vec<Todo>>,
    next_id: Mutex<i64>,
}

impl InMemoryTodoRepository {
    pub fn len(&self) -> usize {
        self.todos.lock().unwrap().len()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self, scope: &OwnershipScope) -> Result<Vec<Todo>, TodoError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .filter(|t| scope.permits(t.owner_id.0))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
    ) -> Result<Option<Todo>, TodoError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .find(|t| t.id == *id && scope.permits(t.owner_id.0))
            .cloned())
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let created = Todo {
            id: TodoId(*next_id),
            title: todo.title,
            description: todo.description,
            priority: todo.priority,
            complete: todo.complete,
            owner_id: todo.owner_id,
        };
        self.todos.lock().unwrap().push(created.clone());

        Ok(created)
    }

    async fn update(
        &self,
        scope: &OwnershipScope,
        id: &TodoId,
        command: &TodoCommand,
    ) -> Result<Option<Todo>, TodoError> {
        let mut todos = self.todos.lock().unwrap();
        Ok(todos
            .iter_mut()
            .find(|t| t.id == *id && scope.permits(t.owner_id.0))
            .map(|t| {
                t.title = command.title.clone();
                t.description = command.description.clone();
                t.priority = command.priority;
                t.complete = command.complete;
                t.clone()
            }))
    }

    async fn delete(&self, scope: &OwnershipScope, id: &TodoId) -> Result<bool, TodoError> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| !(t.id == *id && scope.permits(t.owner_id.0)));
        Ok(todos.len() < before)
    }
}
