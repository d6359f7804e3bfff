#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashCost;
use auth::Role;
use auth::TokenSettings;
use platform_service::bootstrap::ensure_superadmin;
use platform_service::config::BootstrapConfig;
use platform_service::domain::health::HealthCheck;
use platform_service::domain::identity::errors::AuthError;
use platform_service::domain::identity::models::EmailAddress;
use platform_service::domain::identity::models::Identity;
use platform_service::domain::identity::models::IdentityId;
use platform_service::domain::identity::ports::IdentityRepository;
use platform_service::domain::identity::service::AuthService;
use platform_service::domain::restaurant::errors::RestaurantError;
use platform_service::domain::restaurant::models::Restaurant;
use platform_service::domain::restaurant::models::RestaurantId;
use platform_service::domain::restaurant::ports::RestaurantRepository;
use platform_service::domain::restaurant::service::RestaurantService;
use platform_service::inbound::http::router::create_router;
use platform_service::inbound::http::router::AppState;
use serde_json::json;
use serde_json::Value;

pub const SUPERADMIN_EMAIL: &str = "root@example.com";
pub const SUPERADMIN_PASSWORD: &str = "root-password";

/// Identity store backed by a map, enforcing email uniqueness like the
/// `users_email_key` constraint.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: Mutex<HashMap<IdentityId, Identity>>,
}

impl InMemoryIdentityRepository {
    /// Change a stored role, as an operator would directly in the database.
    pub fn set_role(&self, email: &str, role: Role) {
        let mut identities = self.identities.lock().unwrap();
        let identity = identities
            .values_mut()
            .find(|identity| identity.email.as_str() == email)
            .expect("identity to exist");
        identity.role = role;
    }

    pub fn remove(&self, email: &str) {
        self.identities
            .lock()
            .unwrap()
            .retain(|_, identity| identity.email.as_str() != email);
    }

    pub fn count(&self) -> usize {
        self.identities.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, AuthError> {
        let mut identities = self.identities.lock().unwrap();
        if identities.values().any(|i| i.email == identity.email) {
            return Err(AuthError::DuplicateIdentity(identity.email.to_string()));
        }
        identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .values()
            .find(|identity| &identity.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AuthError> {
        Ok(self.identities.lock().unwrap().get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryRestaurantRepository {
    restaurants: Mutex<HashMap<RestaurantId, Restaurant>>,
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn create(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantError> {
        self.restaurants
            .lock()
            .unwrap()
            .insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    async fn find_by_id(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RestaurantError> {
        Ok(self.restaurants.lock().unwrap().get(id).cloned())
    }

    async fn list(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Restaurant>, i64), RestaurantError> {
        let restaurants = self.restaurants.lock().unwrap();
        let mut all: Vec<Restaurant> = restaurants.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = all.len() as i64;
        let items = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok((items, total))
    }

    async fn update(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantError> {
        let mut restaurants = self.restaurants.lock().unwrap();
        match restaurants.get_mut(&restaurant.id) {
            Some(stored) => {
                *stored = restaurant.clone();
                Ok(restaurant)
            }
            None => Err(RestaurantError::NotFound(restaurant.id.to_string())),
        }
    }

    async fn delete(&self, id: &RestaurantId) -> Result<(), RestaurantError> {
        self.restaurants
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(RestaurantError::NotFound(id.to_string()))
    }
}

/// Health probe whose answer the test controls.
pub struct SwitchableHealthCheck {
    healthy: AtomicBool,
}

impl SwitchableHealthCheck {
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }
}

#[async_trait]
impl HealthCheck for SwitchableHealthCheck {
    async fn check_database(&self) -> anyhow::Result<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            anyhow::bail!("connection refused")
        }
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub identities: Arc<InMemoryIdentityRepository>,
    pub health: Arc<SwitchableHealthCheck>,
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

        let authenticator = Arc::new(
            Authenticator::new(&TokenSettings {
                access_secret: b"integration-access-secret-at-least-32-bytes".to_vec(),
                refresh_secret: b"integration-refresh-secret-at-least-32-bytes".to_vec(),
                access_ttl: chrono::Duration::minutes(15),
                refresh_ttl: chrono::Duration::hours(168),
            })
            .expect("Failed to build authenticator")
            .with_hash_cost(HashCost {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .expect("Failed to set hash cost"),
        );

        let identities = Arc::new(InMemoryIdentityRepository::default());
        let restaurants = Arc::new(InMemoryRestaurantRepository::default());
        let health = Arc::new(SwitchableHealthCheck {
            healthy: AtomicBool::new(true),
        });

        ensure_superadmin(
            identities.as_ref(),
            &authenticator,
            &BootstrapConfig {
                superadmin_email: SUPERADMIN_EMAIL.to_string(),
                superadmin_password: SUPERADMIN_PASSWORD.to_string(),
                superadmin_name: Some("Super Admin".to_string()),
            },
        )
        .await
        .expect("Failed to provision superadmin");

        let state = AppState {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&identities),
                Arc::clone(&authenticator),
            )),
            restaurant_service: Arc::new(RestaurantService::new(restaurants)),
            health_check: Arc::clone(&health) as Arc<dyn HealthCheck>,
            access_policy: authenticator.access_policy(),
        };

        let router = create_router(state, Duration::from_secs(15));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            identities,
            health,
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

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an identity and return the response body
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/v1/auth/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the access token
    pub async fn access_token(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("access token in response")
            .to_string()
    }

    pub async fn superadmin_token(&self) -> String {
        self.access_token(SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD)
            .await
    }
}
