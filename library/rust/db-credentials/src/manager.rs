use chrono::{DateTime, Utc};
use k1s0_vault_client::VaultClient;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::LeaseManagerConfig;
use crate::error::CredentialsError;
use crate::lease::Lease;
use crate::path::credentials_path;
use crate::renewal::{Evaluation, RenewalWindow};

/// 動的認証情報のリースを払い出し、評価し、失効させる。
///
/// 各操作は高々 1 回だけ Vault を呼び出し、その完了を待って返る。リトライは行わない。
/// リースは呼び出し側が所有し、マネージャー自身は状態を持たない。
pub struct CredentialLeaseManager {
    client: Arc<dyn VaultClient>,
    window: RenewalWindow,
}

impl CredentialLeaseManager {
    pub fn new(client: Arc<dyn VaultClient>) -> Self {
        Self::with_config(client, &LeaseManagerConfig::default())
    }

    pub fn with_config(client: Arc<dyn VaultClient>, config: &LeaseManagerConfig) -> Self {
        Self {
            client,
            window: config.renewal_window(),
        }
    }

    pub fn window(&self) -> &RenewalWindow {
        &self.window
    }

    /// 新しい認証情報を払い出す。既存のリースがあっても毎回別のリースになる。
    pub async fn issue(&self, backend: &str, name: &str) -> Result<Lease, CredentialsError> {
        let path = credentials_path(backend, name);
        let wrap = |source| CredentialsError::Issue {
            name: name.to_string(),
            backend: backend.to_string(),
            source,
        };

        debug!(name = %name, backend = %backend, "database backend から認証情報を読み取ります");
        let secret = self.client.read(&path).await.map_err(wrap)?;
        let lease = Lease::from_secret(backend, name, secret, Utc::now()).map_err(wrap)?;
        info!(
            name = %name,
            backend = %backend,
            lease_duration = lease.duration_secs(),
            "認証情報を払い出しました"
        );
        Ok(lease)
    }

    /// 現在時刻でリースを評価する。
    pub fn evaluate(&self, lease: &mut Lease) -> Evaluation {
        self.evaluate_at(lease, Utc::now())
    }

    /// 指定時刻でリースを評価する。開始時刻が解析できない場合はその値を破棄する。
    pub fn evaluate_at(&self, lease: &mut Lease, now: DateTime<Utc>) -> Evaluation {
        let duration = lease.duration_secs();
        if self.window.is_due(lease.started_mut(), duration, now) {
            Evaluation::DueForReissue
        } else {
            Evaluation::Fresh
        }
    }

    /// リースを評価し、再払い出しの対象であれば同じ backend と role で払い出し直す。
    /// 古いリースは失効させずに手放す。
    pub async fn reconcile(&self, lease: Lease) -> Result<Lease, CredentialsError> {
        self.reconcile_at(lease, Utc::now()).await
    }

    pub async fn reconcile_at(
        &self,
        mut lease: Lease,
        now: DateTime<Utc>,
    ) -> Result<Lease, CredentialsError> {
        match self.evaluate_at(&mut lease, now) {
            Evaluation::Fresh => Ok(lease),
            Evaluation::DueForReissue => {
                debug!(
                    name = %lease.name(),
                    backend = %lease.backend(),
                    "認証情報の期限が近いため新しい認証情報を取得します"
                );
                self.issue(lease.backend(), lease.name()).await
            }
        }
    }

    /// リース ID を指定して失効させる。
    pub async fn revoke(&self, lease_id: &str) -> Result<(), CredentialsError> {
        debug!(lease_id = %lease_id, "認証情報を失効させます");
        self.client
            .revoke(lease_id)
            .await
            .map_err(|source| CredentialsError::Revoke {
                lease_id: lease_id.to_string(),
                source,
            })
    }

    /// リースを消費して失効させる。失敗時はエラーにリース ID が含まれる。
    pub async fn revoke_lease(&self, lease: Lease) -> Result<(), CredentialsError> {
        self.revoke(lease.id()).await
    }
}
