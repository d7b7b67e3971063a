//! Request Orchestrator
//!
//! Lookup, Define and Authenticated Redefine over the fingerprint-keyed store.
//! Holds no mutable state of its own; every record lives in the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::auth::AccessGate;
use crate::config::Config;
use crate::error::{MockError, Result};
use crate::mock::{
    canonicalize, canonicalize_value, fingerprint, Fingerprint, MockStore, StoreResult,
};
use crate::models::DefineRequest;

/// Orchestrates the three mock operations against a shared store.
#[derive(Clone)]
pub struct MockService {
    store: Arc<dyn MockStore>,
    gate: AccessGate,
    record_ttl: Duration,
    store_timeout: Duration,
}

impl MockService {
    /// Creates a service over `store`, taking TTL and timeout from `config`.
    pub fn new(store: Arc<dyn MockStore>, gate: AccessGate, config: &Config) -> Self {
        Self {
            store,
            gate,
            record_ttl: config.record_ttl(),
            store_timeout: config.store_timeout(),
        }
    }

    // == Lookup ==
    /// Returns the stored response for `path` and the (possibly empty) request body.
    pub async fn lookup(&self, path: &str, body: &[u8]) -> Result<String> {
        let payload = canonicalize(body).inspect_err(|e| debug!(path, "lookup rejected: {}", e))?;
        let key = fingerprint(path, &payload);

        match self.bounded(self.store.get(&key)).await? {
            Some(value) => {
                debug!(path, key = %key, "mock record served");
                Ok(value)
            }
            None => {
                debug!(path, key = %key, "no mock record");
                Err(MockError::RecordNotFound)
            }
        }
    }

    // == Define ==
    /// Stores the payload's `response` under the fingerprint of `path` and its `body`.
    pub async fn define(&self, path: &str, body: &[u8]) -> Result<Fingerprint> {
        let (key, response) =
            parse_write(path, body).inspect_err(|e| debug!(path, "write rejected: {}", e))?;

        self.bounded(self.store.set(&key, response, self.record_ttl))
            .await?;

        info!(path, key = %key, "mock record defined");
        Ok(key)
    }

    // == Authenticated Redefine ==
    /// Same as `define`, but checks the bearer credential first when one is configured.
    ///
    /// Authorization precedes body validation, so an unauthorized caller learns
    /// nothing about its payload.
    pub async fn redefine(
        &self,
        path: &str,
        authorization: Option<&str>,
        body: &[u8],
    ) -> Result<Fingerprint> {
        if self.gate.is_enabled() && !authorization.is_some_and(|h| self.gate.authorize(h)) {
            debug!(path, "redefine rejected: bad or missing credential");
            return Err(MockError::Unauthorized);
        }

        self.define(path, body).await
    }

    /// Runs a store call under the configured deadline.
    async fn bounded<T>(&self, call: impl Future<Output = StoreResult<T>>) -> Result<T> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("store call failed: {}", e);
                Err(e.into())
            }
            Err(_) => {
                error!("store call exceeded {:?}", self.store_timeout);
                Err(MockError::StoreUnavailable(format!(
                    "store call timed out after {:?}",
                    self.store_timeout
                )))
            }
        }
    }
}

/// Validates a write payload and derives its key and stored value.
fn parse_write(path: &str, body: &[u8]) -> Result<(Fingerprint, String)> {
    if body.is_empty() {
        return Err(MockError::EmptyPayload);
    }

    // Only a top-level object may carry the keyed fields
    let request: DefineRequest = match serde_json::from_slice(body) {
        Ok(payload @ Value::Object(_)) => {
            serde_json::from_value(payload).map_err(|_| MockError::MalformedPayload)?
        }
        _ => return Err(MockError::MalformedPayload),
    };

    let response = request
        .response
        .as_ref()
        .map(canonicalize_value)
        .ok_or(MockError::MissingResponse)?;
    let match_payload = request
        .body
        .as_ref()
        .map(canonicalize_value)
        .unwrap_or_default();

    Ok((fingerprint(path, &match_payload), response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ROUTE: &str = "/api/test-route";
    const EMPTY_BODY_ID: &str = "9074f62003bcbed6e87000ad55c501754308685b";
    const TEST_BODY_ID: &str = "1f1eee663738854c4e53bf7be7902de982f22255";

    /// Memory store that counts every call
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MockStore for CountingStore {
        async fn get(&self, key: &Fingerprint) -> StoreResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key).await
        }

        async fn set(&self, key: &Fingerprint, value: String, ttl: Duration) -> StoreResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value, ttl).await
        }
    }

    /// Store whose every call fails at the transport level
    struct FailingStore;

    #[async_trait]
    impl MockStore for FailingStore {
        async fn get(&self, _key: &Fingerprint) -> StoreResult<Option<String>> {
            Err(StoreError::Transport("connection refused".into()))
        }

        async fn set(&self, _key: &Fingerprint, _value: String, _ttl: Duration) -> StoreResult<()> {
            Err(StoreError::Transport("connection refused".into()))
        }
    }

    /// Store that never answers
    struct HangingStore;

    #[async_trait]
    impl MockStore for HangingStore {
        async fn get(&self, _key: &Fingerprint) -> StoreResult<Option<String>> {
            std::future::pending().await
        }

        async fn set(&self, _key: &Fingerprint, _value: String, _ttl: Duration) -> StoreResult<()> {
            std::future::pending().await
        }
    }

    fn service_with(store: Arc<dyn MockStore>, credential: Option<&str>) -> MockService {
        MockService::new(
            store,
            AccessGate::new(credential.map(str::to_string)),
            &Config::default(),
        )
    }

    fn counting_service(credential: Option<&str>) -> (MockService, Arc<CountingStore>) {
        let store = Arc::new(CountingStore::default());
        (service_with(store.clone(), credential), store)
    }

    #[tokio::test]
    async fn test_define_without_body_field_uses_path_only() {
        let (service, _) = counting_service(None);

        let id = service
            .define(ROUTE, br#"{"response": {"test": 20}}"#)
            .await
            .unwrap();
        assert_eq!(id.as_str(), EMPTY_BODY_ID);

        let value = service.lookup(ROUTE, b"").await.unwrap();
        assert_eq!(value, r#"{"test":20}"#);
    }

    #[tokio::test]
    async fn test_define_with_body_field() {
        let (service, _) = counting_service(None);

        let id = service
            .define(ROUTE, br#"{"body": {"test": 10}, "response": {"test": 20}}"#)
            .await
            .unwrap();
        assert_eq!(id.as_str(), TEST_BODY_ID);

        let value = service.lookup(ROUTE, br#"{"test": 10}"#).await.unwrap();
        assert_eq!(value, r#"{"test":20}"#);
    }

    #[tokio::test]
    async fn test_float_spelling_of_integer_matches_lookup() {
        let (service, _) = counting_service(None);

        let id = service
            .define(ROUTE, br#"{"body": {"test": 10.0}, "response": {"ok": 1}}"#)
            .await
            .unwrap();
        assert_eq!(id.as_str(), TEST_BODY_ID);

        for body in [&br#"{"test": 10}"#[..], &br#"{"test": 1e1}"#[..]] {
            assert_eq!(service.lookup(ROUTE, body).await.unwrap(), r#"{"ok":1}"#);
        }
    }

    #[tokio::test]
    async fn test_unrelated_field_ignored() {
        let (service, _) = counting_service(None);

        let id = service
            .define(ROUTE, br#"{"bod": {"test": 10}, "response": {"test": 20}}"#)
            .await
            .unwrap();
        assert_eq!(id.as_str(), EMPTY_BODY_ID);
    }

    #[tokio::test]
    async fn test_null_body_field_treated_as_absent() {
        let (service, _) = counting_service(None);

        let id = service
            .define(ROUTE, br#"{"body": null, "response": 1}"#)
            .await
            .unwrap();
        assert_eq!(id.as_str(), EMPTY_BODY_ID);
    }

    #[tokio::test]
    async fn test_define_is_idempotent_and_last_write_wins() {
        let (service, _) = counting_service(None);
        let payload = br#"{"body": {"test": 10}, "response": {"test": 20}}"#;

        let first = service.define(ROUTE, payload).await.unwrap();
        let second = service.define(ROUTE, payload).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            service.lookup(ROUTE, br#"{"test":10}"#).await.unwrap(),
            r#"{"test":20}"#
        );

        service
            .define(ROUTE, br#"{"body": {"test": 10}, "response": [1, 2]}"#)
            .await
            .unwrap();
        assert_eq!(service.lookup(ROUTE, br#"{"test":10}"#).await.unwrap(), "[1,2]");
    }

    #[tokio::test]
    async fn test_lookup_unknown_record() {
        let (service, store) = counting_service(None);

        let result = service.lookup(ROUTE, br#"{"body": {"test": 10}}"#).await;
        assert!(matches!(result, Err(MockError::RecordNotFound)));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_lookup_malformed_body_skips_store() {
        let (service, store) = counting_service(None);

        for body in [&b"@"[..], &b"[1]"[..], &b"10"[..]] {
            let result = service.lookup(ROUTE, body).await;
            assert!(matches!(result, Err(MockError::MalformedPayload)));
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_define_empty_body_skips_store() {
        let (service, store) = counting_service(None);

        let result = service.define(ROUTE, b"").await;
        assert!(matches!(result, Err(MockError::EmptyPayload)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_define_validation_errors_skip_store() {
        let (service, store) = counting_service(None);

        assert!(matches!(
            service.define(ROUTE, b"@").await,
            Err(MockError::MalformedPayload)
        ));
        assert!(matches!(
            service.define(ROUTE, br#"[{"response": 1}]"#).await,
            Err(MockError::MalformedPayload)
        ));
        assert!(matches!(
            service.define(ROUTE, br#"{"body": {"test": 10}}"#).await,
            Err(MockError::MissingResponse)
        ));
        assert!(matches!(
            service.define(ROUTE, br#"{"response": null}"#).await,
            Err(MockError::MissingResponse)
        ));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_store_unavailable() {
        let service = service_with(Arc::new(FailingStore), None);

        assert!(matches!(
            service.lookup(ROUTE, b"").await,
            Err(MockError::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.define(ROUTE, br#"{"response": 1}"#).await,
            Err(MockError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_store_timeout_is_store_unavailable() {
        let config = Config {
            store_timeout_ms: 20,
            ..Config::default()
        };
        let service = MockService::new(Arc::new(HangingStore), AccessGate::new(None), &config);

        let result = service.lookup(ROUTE, b"").await;
        assert!(matches!(result, Err(MockError::StoreUnavailable(msg)) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn test_redefine_without_gate() {
        let (service, _) = counting_service(None);

        let id = service
            .redefine(ROUTE, None, br#"{"response": {"test": 20}}"#)
            .await
            .unwrap();
        assert_eq!(id.as_str(), EMPTY_BODY_ID);
    }

    #[tokio::test]
    async fn test_redefine_with_empty_credential_is_ungated() {
        let (service, _) = counting_service(Some(""));
        let payload = br#"{"response": {"test": 20}}"#;

        for header in [None, Some("Bearer"), Some("Bearer "), Some("Bearer x")] {
            let id = service.redefine(ROUTE, header, payload).await.unwrap();
            assert_eq!(id.as_str(), EMPTY_BODY_ID);
        }
    }

    #[tokio::test]
    async fn test_redefine_with_valid_credential() {
        let (service, _) = counting_service(Some("test-auth-key"));

        let id = service
            .redefine(
                ROUTE,
                Some("Bearer test-auth-key"),
                br#"{"body": {"test": 10}, "response": {"test": 20}}"#,
            )
            .await
            .unwrap();
        assert_eq!(id.as_str(), TEST_BODY_ID);
    }

    #[tokio::test]
    async fn test_redefine_rejected_leaves_store_untouched() {
        let (service, store) = counting_service(Some("test-auth-key"));
        let payload = br#"{"response": {"test": 20}}"#;

        for header in [None, Some("Bearer bad-auth-key"), Some("test-auth-key")] {
            let result = service.redefine(ROUTE, header, payload).await;
            assert!(matches!(result, Err(MockError::Unauthorized)));
        }
        assert_eq!(store.calls(), 0);

        assert!(matches!(
            service.lookup(ROUTE, b"").await,
            Err(MockError::RecordNotFound)
        ));
    }

    #[tokio::test]
    async fn test_redefine_checks_credential_before_body() {
        let (service, _) = counting_service(Some("test-auth-key"));

        let result = service.redefine(ROUTE, None, b"").await;
        assert!(matches!(result, Err(MockError::Unauthorized)));
    }
}
