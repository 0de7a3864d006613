use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use chrono::Duration;
use fake::{Fake, faker::internet::en::SafeEmail};
use psychbook_api::{ApiState, app, middleware::auth::{JwtConfig, issue_token}};
use psychbook_core::{
    models::user::{Identity, NewUser, Role},
    repository::UserRepository,
};
use psychbook_db::MemoryStore;
use uuid::Uuid;

pub const TEST_SECRET: &str = "handler-test-secret";

pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub jwt: JwtConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let jwt = JwtConfig::new(TEST_SECRET);
        let state = Arc::new(ApiState::new(store.clone(), jwt.clone()));
        let server = TestServer::new(app(state)).unwrap();

        Self { server, store, jwt }
    }

    /// Provisions a user in the store and returns it with a bearer header.
    pub async fn user(&self, role: Role) -> (Identity, (HeaderName, HeaderValue)) {
        let user = self
            .store
            .create_user(&NewUser {
                email: SafeEmail().fake(),
                username: String::new(),
                role,
            })
            .await
            .unwrap();
        let identity = Identity::from(&user);
        let header = self.bearer(&identity);
        (identity, header)
    }

    pub fn bearer(&self, identity: &Identity) -> (HeaderName, HeaderValue) {
        let token = issue_token(identity, &self.jwt, Duration::hours(1)).unwrap();
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        )
    }

    /// Creates a cabin through the API and returns its id.
    pub async fn cabin(&self, auth: &(HeaderName, HeaderValue), name: &str) -> Uuid {
        let response = self
            .server
            .post("/api/cabins")
            .add_header(auth.0.clone(), auth.1.clone())
            .json(&serde_json::json!({ "name": name, "location": "Main St 1" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<serde_json::Value>()["id"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap()
    }

    /// Assigns `psychologist` to `cabin_id` on behalf of the owning admin.
    pub async fn assign(&self, auth: &(HeaderName, HeaderValue), cabin_id: Uuid, psychologist: Uuid) {
        let response = self
            .server
            .post(&format!("/api/cabins/{}/psychologists", cabin_id))
            .add_header(auth.0.clone(), auth.1.clone())
            .json(&serde_json::json!({ "psychologist_id": psychologist }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }
}
