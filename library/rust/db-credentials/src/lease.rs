use chrono::{DateTime, SecondsFormat, Utc};
use k1s0_vault_client::{LeasedSecret, VaultError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// 払い出し済みの動的認証情報とそのリース情報。
///
/// backend と name は払い出し後に変更できない。別の role が必要な場合は新しいリースを払い出す。
#[derive(Debug, Clone)]
pub struct Lease {
    id: String,
    backend: String,
    name: String,
    username: SecretString,
    password: SecretString,
    renewable: bool,
    duration_secs: i64,
    started: String,
}

impl Lease {
    /// Vault の応答からリースを組み立てる。username と password が揃わない応答は受け付けない。
    pub(crate) fn from_secret(
        backend: &str,
        name: &str,
        secret: LeasedSecret,
        started: DateTime<Utc>,
    ) -> Result<Self, VaultError> {
        let field = |key: &str| {
            secret
                .data_value(key)
                .map(|v| SecretString::new(v.to_string()))
                .ok_or_else(|| VaultError::InvalidResponse(format!("missing data.{key}")))
        };
        let username = field("username")?;
        let password = field("password")?;
        Ok(Self {
            id: secret.lease_id,
            backend: backend.to_string(),
            name: name.to_string(),
            username,
            password,
            renewable: secret.renewable,
            duration_secs: secret.lease_duration,
            started: started.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &SecretString {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn renewable(&self) -> bool {
        self.renewable
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    /// RFC 3339 形式の開始時刻。解析できない値が破棄された後は空文字列。
    pub fn started(&self) -> &str {
        &self.started
    }

    pub(crate) fn started_mut(&mut self) -> &mut String {
        &mut self.started
    }

    /// 永続化用のレコードに変換する。認証情報が平文で含まれる点に注意。
    pub fn to_record(&self) -> CredentialsRecord {
        CredentialsRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            backend: self.backend.clone(),
            username: self.username.expose_secret().clone(),
            password: self.password.expose_secret().clone(),
            lease_renewable: self.renewable,
            lease_duration: self.duration_secs,
            lease_started: self.started.clone(),
        }
    }

    /// 永続化されたレコードからリースを復元する。
    pub fn from_record(record: CredentialsRecord) -> Self {
        Self {
            id: record.id,
            backend: record.backend,
            name: record.name,
            username: SecretString::new(record.username),
            password: SecretString::new(record.password),
            renewable: record.lease_renewable,
            duration_secs: record.lease_duration,
            started: record.lease_started,
        }
    }
}

impl From<CredentialsRecord> for Lease {
    fn from(record: CredentialsRecord) -> Self {
        Self::from_record(record)
    }
}

/// 呼び出し側に公開するリースの表現。評価と評価の間で永続化される唯一の形式。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsRecord {
    pub id: String,
    pub name: String,
    pub backend: String,
    pub username: String,
    pub password: String,
    pub lease_renewable: bool,
    pub lease_duration: i64,
    #[serde(default)]
    pub lease_started: String,
}

impl std::fmt::Debug for CredentialsRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("backend", &self.backend)
            .field("username", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("lease_renewable", &self.lease_renewable)
            .field("lease_duration", &self.lease_duration)
            .field("lease_started", &self.lease_started)
            .finish()
    }
}
