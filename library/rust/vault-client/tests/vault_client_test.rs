use std::collections::HashMap;
use std::sync::Arc;

use k1s0_vault_client::{
    InMemoryVaultClient, LeasedSecret, VaultClient, VaultClientConfig, VaultError,
};

fn db_secret() -> LeasedSecret {
    LeasedSecret {
        lease_id: String::new(),
        renewable: false,
        lease_duration: 600,
        data: HashMap::from([
            ("username".to_string(), "v-app-1".to_string()),
            ("password".to_string(), "p@ss".to_string()),
        ]),
    }
}

#[tokio::test]
async fn test_issue_and_revoke_through_trait_object() {
    let memory = Arc::new(InMemoryVaultClient::new(VaultClientConfig::new(
        "http://localhost:8200",
    )));
    memory.put_secret("database/creds/app", db_secret()).await;
    let client: Arc<dyn VaultClient> = memory.clone();

    let secret = client.read("database/creds/app").await.unwrap();
    assert_eq!(secret.lease_duration, 600);
    assert!(memory.is_active(&secret.lease_id).await);

    client.revoke(&secret.lease_id).await.unwrap();
    assert_eq!(memory.active_lease_count().await, 0);

    let err = client.revoke(&secret.lease_id).await.unwrap_err();
    assert!(matches!(err, VaultError::NotFound(_)));
}

#[test]
fn test_leased_secret_deserialize_vault_payload() {
    let payload = serde_json::json!({
        "lease_id": "database/creds/app/xyz",
        "renewable": true,
        "lease_duration": 2764800,
        "data": { "username": "v-app-2", "password": "pw" }
    });
    let secret: LeasedSecret = serde_json::from_value(payload).unwrap();
    assert_eq!(secret.lease_id, "database/creds/app/xyz");
    assert!(secret.renewable);
    assert_eq!(secret.lease_duration, 2_764_800);
    assert_eq!(secret.data_value("password"), Some("pw"));
    assert_eq!(secret.data_value("missing"), None);
}

#[test]
fn test_leased_secret_defaults_missing_fields() {
    let secret: LeasedSecret =
        serde_json::from_value(serde_json::json!({ "lease_id": "x" })).unwrap();
    assert!(!secret.renewable);
    assert_eq!(secret.lease_duration, 0);
    assert!(secret.data.is_empty());
}
