//! Vault の database シークレットエンジンが払い出す動的認証情報のリース管理。
//!
//! 払い出し (issue)、期限判定 (evaluate)、再払い出し (reconcile)、失効 (revoke) を提供する。
//! リースの保持は呼び出し側が行い、本クレートはプロセス全体の状態を持たない。

pub mod config;
pub mod error;
pub mod lease;
pub mod manager;
pub mod path;
pub mod renewal;

pub use config::LeaseManagerConfig;
pub use error::CredentialsError;
pub use lease::{CredentialsRecord, Lease};
pub use manager::CredentialLeaseManager;
pub use path::credentials_path;
pub use renewal::{is_due_for_reissue, Evaluation, RenewalWindow, WindowMode};
