use std::time::Duration;

#[derive(Clone)]
pub struct VaultClientConfig {
    pub server_url: String,
    pub token: String,
    pub namespace: Option<String>,
    pub timeout: Duration,
}

impl VaultClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            token: String::new(),
            namespace: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Vault Enterprise の名前空間を設定する。
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 末尾のスラッシュを除いたサーバー URL を返す。
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

// トークンはログに出さない。
impl std::fmt::Debug for VaultClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClientConfig")
            .field("server_url", &self.server_url)
            .field("token", &"[REDACTED]")
            .field("namespace", &self.namespace)
            .field("timeout", &self.timeout)
            .finish()
    }
}
