use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// 期限前後の再払い出しウィンドウの既定幅。
pub const DEFAULT_RENEWAL_BUFFER: Duration = Duration::from_secs(5 * 60);

/// 再払い出しウィンドウの上端の判定方法。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// 期限が `now - buffer` より後なら対象外とする従来の判定。
    /// 下端の判定と合わせて区間がほぼ空になるため、期限がちょうど `now - buffer`
    /// の瞬間を除き再払い出し対象にならない。既存の再払い出し頻度を変えないため既定とする。
    #[default]
    Compat,
    /// 期限が `now + buffer` より後なら対象外とする判定。
    /// 期限が `[now - buffer, now + buffer]` に入るリースを再払い出し対象とする。
    Symmetric,
}

/// リース評価の結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// 再払い出しは不要。
    Fresh,
    /// 期限が近く、再払い出しの対象。
    DueForReissue,
}

impl Evaluation {
    pub fn is_due(self) -> bool {
        matches!(self, Evaluation::DueForReissue)
    }
}

/// ローカルの時刻のみでリースの再払い出し要否を判定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalWindow {
    buffer: TimeDelta,
    mode: WindowMode,
}

impl Default for RenewalWindow {
    fn default() -> Self {
        Self::new(DEFAULT_RENEWAL_BUFFER, WindowMode::default())
    }
}

impl RenewalWindow {
    pub fn new(buffer: Duration, mode: WindowMode) -> Self {
        Self {
            buffer: TimeDelta::from_std(buffer).unwrap_or(TimeDelta::MAX),
            mode,
        }
    }

    pub fn buffer(&self) -> TimeDelta {
        self.buffer
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// `started` (RFC 3339) を起点に再払い出し対象かを判定する。
    ///
    /// `started` が空なら対象外。解析できない値は空にしたうえで対象外とし、
    /// 次回以降の評価で同じ値に失敗し続けないようにする。
    pub fn is_due(&self, started: &mut String, duration_secs: i64, now: DateTime<Utc>) -> bool {
        if started.is_empty() {
            return false;
        }
        match DateTime::parse_from_rfc3339(started) {
            Ok(parsed) => self.is_due_at(parsed.with_timezone(&Utc), duration_secs, now),
            Err(e) => {
                debug!(
                    lease_started = %started,
                    error = %e,
                    "lease_started を解析できないため値を破棄します"
                );
                started.clear();
                false
            }
        }
    }

    /// 解析済みの開始時刻に対して判定する。
    pub fn is_due_at(
        &self,
        started: DateTime<Utc>,
        duration_secs: i64,
        now: DateTime<Utc>,
    ) -> bool {
        // 期限を表現できないほど長いリースは当面期限切れにならない
        let Some(expiry) =
            TimeDelta::try_seconds(duration_secs).and_then(|d| started.checked_add_signed(d))
        else {
            return false;
        };

        // 期限切れから buffer 以上経過したリースは継続を前提にできない
        if expiry
            .checked_add_signed(self.buffer)
            .is_some_and(|t| t < now)
        {
            return false;
        }

        let before_window = match self.mode {
            WindowMode::Compat => now
                .checked_sub_signed(self.buffer)
                .is_none_or(|bound| expiry > bound),
            WindowMode::Symmetric => now
                .checked_add_signed(self.buffer)
                .is_some_and(|bound| expiry > bound),
        };
        !before_window
    }
}

/// 既定のウィンドウ (5 分, [`WindowMode::Compat`]) で判定する。
pub fn is_due_for_reissue(started: &mut String, duration_secs: i64, now: DateTime<Utc>) -> bool {
    RenewalWindow::default().is_due(started, duration_secs, now)
}
