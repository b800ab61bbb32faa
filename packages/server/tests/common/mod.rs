// Common test utilities

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use server_core::kernel::test_dependencies::{
    InMemoryMemberStore, MockMailer, MockWhitelistService, TestDependencies,
};
use server_core::server::build_app;

pub const TEST_SECRET: &str = "club-shared-secret";

/// The app under test plus handles on its injected doubles.
pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryMemberStore>,
    pub mailer: Arc<MockMailer>,
    pub whitelist: Arc<MockWhitelistService>,
}

pub fn test_app() -> TestApp {
    test_app_with(TestDependencies::new())
}

pub fn test_app_with(deps: TestDependencies) -> TestApp {
    let app = build_app(Arc::new(deps.server_deps()), TEST_SECRET.to_string());
    TestApp {
        app,
        store: deps.store,
        mailer: deps.mailer,
        whitelist: deps.whitelist,
    }
}

impl TestApp {
    /// One request through the full router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        secret: Option<&str>,
        body: Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(secret) = secret {
            builder = builder.header("x-api-key", secret);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn add_user(&self, body: Value) -> Response<Body> {
        self.request(Method::PUT, "/addUser", Some(TEST_SECRET), body)
            .await
    }

    pub async fn verify_user(&self, body: Value) -> Response<Body> {
        self.request(Method::POST, "/verifyUser", None, body).await
    }

    pub async fn find_user(&self, body: Value) -> Response<Body> {
        self.request(Method::POST, "/findUser", Some(TEST_SECRET), body)
            .await
    }

    /// Wait for the detached registration workflow to deliver `count` emails.
    pub async fn wait_for_emails(&self, count: usize) {
        for _ in 0..200 {
            if self.mailer.sent().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "expected {} emails, saw {}",
            count,
            self.mailer.sent().len()
        );
    }

    /// Wait until a member record carries a verification code.
    pub async fn wait_for_registration(&self) {
        for _ in 0..200 {
            if self
                .store
                .all()
                .iter()
                .any(|m| m.verification_code.is_some())
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no member record ever received a verification code");
    }
}

pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn response_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
