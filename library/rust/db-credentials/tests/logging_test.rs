use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use k1s0_db_credentials::CredentialLeaseManager;
use k1s0_vault_client::{InMemoryVaultClient, LeasedSecret, VaultClientConfig};
use tracing::Level;

const LEASE_ID: &str = "database/creds/readonly/q7Zk2mTf";

/// テスト用にログ出力をメモリへ書き出すライター。
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn gateway() -> Arc<InMemoryVaultClient> {
    let client = Arc::new(InMemoryVaultClient::new(VaultClientConfig::new(
        "http://localhost:8200",
    )));
    client
        .put_secret(
            "database/creds/readonly",
            LeasedSecret {
                lease_id: LEASE_ID.to_string(),
                renewable: true,
                lease_duration: 3600,
                data: HashMap::from([
                    ("username".to_string(), "v-readonly-u1".to_string()),
                    ("password".to_string(), "A1a-p1-s3cr3t".to_string()),
                ]),
            },
        )
        .await;
    client
}

fn capture() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

#[tokio::test]
async fn test_issue_logs_do_not_contain_lease_id_or_credentials() {
    let client = gateway().await;
    let manager = CredentialLeaseManager::new(client);

    let (logs, _guard) = capture();
    let lease = manager.issue("database", "readonly").await.unwrap();
    assert_eq!(lease.id(), LEASE_ID);

    let output = logs.contents();
    assert!(output.contains("認証情報を払い出しました"), "{output}");
    assert!(output.contains("readonly"), "{output}");
    assert!(!output.contains("q7Zk2mTf"), "{output}");
    assert!(!output.contains("v-readonly-u1"), "{output}");
    assert!(!output.contains("A1a-p1-s3cr3t"), "{output}");
}

#[tokio::test]
async fn test_reconcile_logs_do_not_contain_lease_id() {
    let client = gateway().await;
    let manager = CredentialLeaseManager::new(client);
    let lease = manager.issue("database", "readonly").await.unwrap();

    let (logs, _guard) = capture();
    let lease = manager.reconcile(lease).await.unwrap();
    assert_eq!(lease.id(), LEASE_ID);
    assert!(!logs.contents().contains("q7Zk2mTf"));
}
