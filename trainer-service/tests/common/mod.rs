use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use trainer_service::domain::food::errors::FoodError;
use trainer_service::domain::food::models::DateRange;
use trainer_service::domain::food::models::FoodItem;
use trainer_service::domain::food::models::FoodItemId;
use trainer_service::domain::food::models::FoodLogEntry;
use trainer_service::domain::food::models::FoodLogId;
use trainer_service::domain::food::models::NewFoodItem;
use trainer_service::domain::food::models::NewFoodLog;
use trainer_service::domain::food::ports::FoodRepository;
use trainer_service::domain::food::service::FoodService;
use trainer_service::domain::training::errors::TrainingError;
use trainer_service::domain::training::models::ExerciseEntry;
use trainer_service::domain::training::models::ExerciseEntryId;
use trainer_service::domain::training::models::NewExerciseEntry;
use trainer_service::domain::training::ports::TrainingRepository;
use trainer_service::domain::training::service::TrainingService;
use trainer_service::domain::user::errors::UserError;
use trainer_service::domain::user::models::NewUser;
use trainer_service::domain::user::models::User;
use trainer_service::domain::user::models::UserId;
use trainer_service::domain::user::models::Username;
use trainer_service::domain::user::ports::UserRepository;
use trainer_service::domain::user::service::UserService;
use trainer_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());

        // Cheap argon2 cost keeps the suite fast
        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, Duration::hours(72)).with_password_hasher(
                PasswordHasher::with_params(8, 1, 1).expect("Failed to build hasher"),
            ),
        );

        let user_service = Arc::new(UserService::new(
            Arc::clone(&store),
            Arc::clone(&authenticator),
        ));
        let food_service = Arc::new(FoodService::new(Arc::clone(&store)));
        let training_service = Arc::new(TrainingService::new(Arc::clone(&store)));

        let router = create_router(user_service, food_service, training_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response status and body
    pub async fn register(&self, username: &str, password: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .post("/auth/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        (status, response.json().await.expect("Failed to parse response"))
    }

    /// Log in and return the response status and body
    pub async fn login(&self, username: &str, password: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        (status, response.json().await.expect("Failed to parse response"))
    }

    /// Register and log in, returning a bearer token
    pub async fn signed_in(&self, username: &str) -> String {
        self.register(username, "pass_word!").await;
        let (_, body) = self.login(username, "pass_word!").await;
        body["token"]
            .as_str()
            .expect("Login did not return a token")
            .to_string()
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    food_items: Vec<FoodItem>,
    food_logs: Vec<FoodLogEntry>,
    exercises: Vec<ExerciseEntry>,
}

/// Store double backing every repository port.
///
/// Usernames are unique, ids are assigned sequentially per table, and
/// `fail_writes` makes every insert report a database error.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn password_hash(&self, username: &str) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username.as_str() == username)
            .map(|u| u.password_hash.clone())
    }

    pub fn food_items(&self) -> Vec<FoodItem> {
        self.tables.lock().unwrap().food_items.clone()
    }

    fn writes_failing(&self) -> bool {
        self.fail_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        if self.writes_failing() {
            return Err(UserError::DatabaseError("connection refused".to_string()));
        }

        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        let created = User {
            id: UserId(tables.users.len() as i64 + 1),
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| &u.username == username)
            .cloned())
    }
}

#[async_trait]
impl FoodRepository for InMemoryStore {
    async fn create_food_item(&self, item: NewFoodItem) -> Result<FoodItem, FoodError> {
        if self.writes_failing() {
            return Err(FoodError::DatabaseError("connection refused".to_string()));
        }

        let mut tables = self.tables.lock().unwrap();
        let created = FoodItem {
            id: FoodItemId(tables.food_items.len() as i64 + 1),
            user_id: item.user_id,
            name: item.name,
            per_100g: item.per_100g,
            created_at: Utc::now(),
        };
        tables.food_items.push(created.clone());
        Ok(created)
    }

    async fn log_food_item(&self, entry: NewFoodLog) -> Result<FoodLogEntry, FoodError> {
        if self.writes_failing() {
            return Err(FoodError::DatabaseError("connection refused".to_string()));
        }

        let mut tables = self.tables.lock().unwrap();
        let food_name = tables
            .food_items
            .iter()
            .find(|item| item.id == entry.food_id)
            .map(|item| item.name.as_str().to_string())
            .ok_or_else(|| FoodError::DatabaseError("foreign key violation".to_string()))?;

        let logged = FoodLogEntry {
            id: FoodLogId(tables.food_logs.len() as i64 + 1),
            user_id: entry.user_id,
            food_id: entry.food_id,
            food_name,
            total_grams: entry.total_grams,
            consumed: entry.consumed,
            logged_at: Utc::now(),
        };
        tables.food_logs.push(logged.clone());
        Ok(logged)
    }

    async fn view_food(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<FoodLogEntry>, FoodError> {
        let mut entries: Vec<FoodLogEntry> = self
            .tables
            .lock()
            .unwrap()
            .food_logs
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| e.logged_at >= range.start() && e.logged_at < range.end())
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.logged_at);
        Ok(entries)
    }
}

#[async_trait]
impl TrainingRepository for InMemoryStore {
    async fn log_exercise(&self, entry: NewExerciseEntry) -> Result<ExerciseEntry, TrainingError> {
        if self.writes_failing() {
            return Err(TrainingError::DatabaseError(
                "connection refused".to_string(),
            ));
        }

        let mut tables = self.tables.lock().unwrap();
        let command = entry.command;
        let logged = ExerciseEntry {
            id: ExerciseEntryId(tables.exercises.len() as i64 + 1),
            user_id: entry.user_id,
            exercise_name: command.exercise_name,
            weight: command.weight,
            sets: command.sets,
            reps: command.reps,
            rpe: command.rpe,
            notes: command.notes,
            logged_at: Utc::now(),
        };
        tables.exercises.push(logged.clone());
        Ok(logged)
    }
}
