use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::VaultClientConfig;
use crate::error::VaultError;
use crate::secret::LeasedSecret;

/// 動的シークレットの払い出しとリース失効を行うクライアント。
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait VaultClient: Send + Sync {
    /// 指定パスを読み取り、新しいリース付きシークレットを払い出す。
    async fn read(&self, path: &str) -> Result<LeasedSecret, VaultError>;
    /// リース ID を指定してリースを失効させる。
    async fn revoke(&self, lease_id: &str) -> Result<(), VaultError>;
}

#[derive(Default)]
struct State {
    secrets: HashMap<String, LeasedSecret>,
    // lease_id -> path
    active: HashMap<String, String>,
    reads: Vec<String>,
}

/// テストおよびローカル開発用のインメモリ実装。
pub struct InMemoryVaultClient {
    config: VaultClientConfig,
    state: Mutex<State>,
}

impl InMemoryVaultClient {
    pub fn new(config: VaultClientConfig) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
        }
    }

    pub fn config(&self) -> &VaultClientConfig {
        &self.config
    }

    /// path の読み取りで返すシークレットを登録する。
    /// lease_id が空の場合は読み取りごとに新しい ID を採番する。
    pub async fn put_secret(&self, path: impl Into<String>, secret: LeasedSecret) {
        let mut state = self.state.lock().await;
        state.secrets.insert(path.into(), secret);
    }

    /// これまでに読み取られたパスを呼び出し順に返す。
    pub async fn read_paths(&self) -> Vec<String> {
        self.state.lock().await.reads.clone()
    }

    pub async fn is_active(&self, lease_id: &str) -> bool {
        self.state.lock().await.active.contains_key(lease_id)
    }

    pub async fn active_lease_count(&self) -> usize {
        self.state.lock().await.active.len()
    }
}

#[async_trait]
impl VaultClient for InMemoryVaultClient {
    async fn read(&self, path: &str) -> Result<LeasedSecret, VaultError> {
        let mut state = self.state.lock().await;
        state.reads.push(path.to_string());

        let mut secret = state
            .secrets
            .get(path)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(path.to_string()))?;
        if secret.lease_id.is_empty() {
            secret.lease_id = format!("{path}/{}", Uuid::new_v4());
        }
        state.active.insert(secret.lease_id.clone(), path.to_string());
        Ok(secret)
    }

    async fn revoke(&self, lease_id: &str) -> Result<(), VaultError> {
        let mut state = self.state.lock().await;
        state
            .active
            .remove(lease_id)
            .map(|_| ())
            .ok_or_else(|| VaultError::NotFound(lease_id.to_string()))
    }
}
