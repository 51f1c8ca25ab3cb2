#![allow(dead_code)]

mod fixtures;

pub use fixtures::{auth_body, user_json};

use tr_session::{ApiClient, MemoryTokenStore, RecordingNotifier, SessionManager, SessionOptions};

use std::sync::Arc;

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// A session wired to a mock API, an in-memory token store and a recording notifier.
pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemoryTokenStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: SessionManager,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_store(MemoryTokenStore::new(), SessionOptions::default()).await
    }

    pub async fn with_tokens(access: &str, refresh: &str) -> Self {
        Self::with_store(
            MemoryTokenStore::with_tokens(access, refresh),
            SessionOptions::default(),
        )
        .await
    }

    /// Restored session for user `user_id`, holding tokens `A` / `R`.
    pub async fn authenticated(user_id: u64) -> Self {
        Self::authenticated_with(user_id, SessionOptions::default()).await
    }

    pub async fn authenticated_with(user_id: u64, options: SessionOptions) -> Self {
        let h = Self::with_store(MemoryTokenStore::with_tokens("A", "R"), options).await;

        Mock::given(method("GET"))
            .and(path("/profiles/dashboard/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(user_id)))
            .up_to_n_times(1)
            .mount(&h.server)
            .await;

        let state = h.session.initialize().await;
        assert!(state.is_authenticated());
        h
    }

    pub async fn with_store(store: MemoryTokenStore, options: SessionOptions) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::new());
        let session = SessionManager::new(
            ApiClient::new(&server.uri()),
            store.clone(),
            notifier.clone(),
        )
        .with_options(options);

        Self {
            server,
            store,
            notifier,
            session,
        }
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        use tr_session::TokenStore;
        self.store.get(key).unwrap()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifier
            .notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }
}
