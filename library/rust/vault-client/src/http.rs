use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use tracing::debug;

use crate::client::VaultClient;
use crate::config::VaultClientConfig;
use crate::error::VaultError;
use crate::secret::LeasedSecret;

const TOKEN_HEADER: &str = "X-Vault-Token";
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Vault HTTP API を呼び出すクライアント。
///
/// 動的シークレットは読み取りごとに新しい認証情報が払い出されるため、
/// レスポンスはキャッシュしない。
pub struct HttpVaultClient {
    config: VaultClientConfig,
    http: reqwest::Client,
}

impl HttpVaultClient {
    pub fn new(config: VaultClientConfig) -> Result<Self, VaultError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VaultError::ServerError(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &VaultClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url(), path)
    }

    fn with_headers(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(TOKEN_HEADER, &self.config.token);
        match &self.config.namespace {
            Some(ns) => req.header(NAMESPACE_HEADER, ns),
            None => req,
        }
    }
}

fn transport_error(e: reqwest::Error) -> VaultError {
    if e.is_timeout() {
        VaultError::Timeout
    } else {
        VaultError::ServerError(e.to_string())
    }
}

fn status_error(status: StatusCode, subject: &str) -> VaultError {
    match status {
        StatusCode::NOT_FOUND => VaultError::NotFound(subject.to_string()),
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
            VaultError::PermissionDenied(subject.to_string())
        }
        status => VaultError::ServerError(format!("unexpected status: {status}")),
    }
}

#[async_trait]
impl VaultClient for HttpVaultClient {
    async fn read(&self, path: &str) -> Result<LeasedSecret, VaultError> {
        debug!(path = %path, "Vault からシークレットを読み取ります");
        let resp = self
            .with_headers(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(status_error(status, path));
        }
        let secret: LeasedSecret = resp
            .json()
            .await
            .map_err(|e| VaultError::InvalidResponse(e.to_string()))?;
        debug!(
            path = %path,
            lease_duration = secret.lease_duration,
            "シークレットを払い出しました"
        );
        Ok(secret)
    }

    async fn revoke(&self, lease_id: &str) -> Result<(), VaultError> {
        debug!(lease_id = %lease_id, "リースを失効させます");
        let body = serde_json::json!({ "lease_id": lease_id });
        let resp = self
            .with_headers(self.http.put(self.url("sys/leases/revoke")))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        match resp.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            status => Err(status_error(status, lease_id)),
        }
    }
}
