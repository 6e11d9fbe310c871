use serde::Deserialize;
use std::time::Duration;

use crate::renewal::{RenewalWindow, WindowMode, DEFAULT_RENEWAL_BUFFER};

/// リースマネージャーの設定。サービスの設定 YAML に埋め込んで読み込める。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeaseManagerConfig {
    /// 期限前後の再払い出しウィンドウの幅（秒）。
    pub renewal_buffer_secs: u64,
    pub window_mode: WindowMode,
}

impl Default for LeaseManagerConfig {
    fn default() -> Self {
        Self {
            renewal_buffer_secs: DEFAULT_RENEWAL_BUFFER.as_secs(),
            window_mode: WindowMode::default(),
        }
    }
}

impl LeaseManagerConfig {
    pub fn renewal_buffer(mut self, buffer: Duration) -> Self {
        self.renewal_buffer_secs = buffer.as_secs();
        self
    }

    pub fn window_mode(mut self, mode: WindowMode) -> Self {
        self.window_mode = mode;
        self
    }

    pub fn renewal_window(&self) -> RenewalWindow {
        RenewalWindow::new(
            Duration::from_secs(self.renewal_buffer_secs),
            self.window_mode,
        )
    }
}
