use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 動的シークレットエンジンが払い出したリース付きシークレット。
#[derive(Clone, Serialize, Deserialize)]
pub struct LeasedSecret {
    pub lease_id: String,
    #[serde(default)]
    pub renewable: bool,
    /// リースの有効期間（秒）。
    #[serde(default)]
    pub lease_duration: i64,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl LeasedSecret {
    pub fn data_value(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

// data には認証情報が入るため値は出力しない。
impl std::fmt::Debug for LeasedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.data.keys().collect();
        keys.sort();
        f.debug_struct("LeasedSecret")
            .field("lease_id", &self.lease_id)
            .field("renewable", &self.renewable)
            .field("lease_duration", &self.lease_duration)
            .field("data_keys", &keys)
            .finish()
    }
}
