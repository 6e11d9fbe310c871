use k1s0_vault_client::VaultError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("issuing credentials for role {name:?} on backend {backend:?}: {source}")]
    Issue {
        name: String,
        backend: String,
        #[source]
        source: VaultError,
    },
    #[error("revoking credentials {lease_id:?}: {source}")]
    Revoke {
        lease_id: String,
        #[source]
        source: VaultError,
    },
}
