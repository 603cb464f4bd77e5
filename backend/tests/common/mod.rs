// Shared helpers for the integration tests: a running server and signing utilities.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use expensesms::database::MemoryStore;
use expensesms::{AppState, Config};
use expensesms_adapters::{AdapterError, CustomerOrder, InventoryAdapter, OrderQuery};

pub const SECRET: &str = "integration-secret";

/// How long a `pause*` token holds an orders request.
pub const PAUSE: Duration = Duration::from_millis(800);

/// Fake MoySklad: returns `limit` orders, sleeps 5s for tokens starting with
/// `slow` and `PAUSE` for tokens starting with `pause`, rejects `revoked`.
pub struct FakeInventory;

#[async_trait]
impl InventoryAdapter for FakeInventory {
    async fn customer_orders(
        &self,
        access_token: &str,
        query: &OrderQuery,
    ) -> Result<Vec<CustomerOrder>, AdapterError> {
        if access_token.starts_with("slow") {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if access_token.starts_with("pause") {
            tokio::time::sleep(PAUSE).await;
        }
        if access_token == "revoked" {
            return Err(AdapterError::Unauthorized);
        }
        Ok((0..query.limit)
            .map(|i| CustomerOrder {
                id: format!("{}", query.offset + i),
                name: format!("order-{}", query.offset + i),
                moment: None,
                sum: 100 * i as i64,
                description: None,
                state: None,
            })
            .collect())
    }
}

pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start(config: Config) -> Self {
        let state = AppState::new(config, Arc::new(MemoryStore::new()), Arc::new(FakeInventory));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            expensesms::server::serve(listener, state, async {
                let _ = rx.await;
            })
            .await
            .ok();
        });

        Self {
            base: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            shutdown: Some(tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub fn config_with_secret(secret: Option<&str>) -> Config {
    let mut config = Config::default();
    config.app.secret = secret.map(String::from);
    config
}

pub fn sign_body(body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn vendor_token(key: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(r#"{"sub":"expensesms","iat":1700000000,"jti":"t-1"}"#);
    let signed = format!("{}.{}", header, claims);
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes()).unwrap();
    mac.update(signed.as_bytes());
    format!("{}.{}", signed, URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}
