//! Flash alerts that close themselves.

/// Every alert is closed this long after it was rendered
pub const ALERT_LIFETIME_MS: i64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertKind {
    /// Bootstrap contextual class
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Info => "alert-info",
            Self::Warning => "alert-warning",
            Self::Error => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
    pub shown_at: i64,
}

impl Alert {
    pub fn expires_at(&self) -> i64 {
        self.shown_at + ALERT_LIFETIME_MS
    }
}

#[derive(Debug, Default)]
pub struct AlertTray {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render an alert at `now`; returns its id
    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>, now: i64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.alerts.push(Alert {
            id,
            kind,
            message: message.into(),
            shown_at: now,
        });
        id
    }

    /// Close an alert early. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.alerts.retain(|a| a.id != id);
    }

    /// Alerts still open at `now`
    pub fn visible(&self, now: i64) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| now < a.expires_at()).collect()
    }

    /// Drop expired alerts and return how many were closed
    pub fn prune(&mut self, now: i64) -> usize {
        let before = self.alerts.len();
        self.alerts.retain(|a| now < a.expires_at());
        before - self.alerts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_closes_after_lifetime() {
        // テスト項目: アラートは表示から 5000 ms 後に閉じる
        // given (前提条件):
        let mut tray = AlertTray::new();
        tray.push(AlertKind::Success, "Meeting started!", 1000);

        // when (操作):
        let before = tray.visible(5999).len();
        let after = tray.visible(6000).len();

        // then (期待する結果):
        assert_eq!(before, 1);
        assert_eq!(after, 0);
    }

    #[test]
    fn test_prune_keeps_newer_alerts() {
        // テスト項目: 期限切れのアラートだけが削除される
        // given (前提条件):
        let mut tray = AlertTray::new();
        tray.push(AlertKind::Error, "Meeting not found", 0);
        tray.push(AlertKind::Info, "Joining meeting...", 3000);

        // when (操作):
        let closed = tray.prune(5000);

        // then (期待する結果):
        assert_eq!(closed, 1);
        let visible = tray.visible(5000);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "Joining meeting...");
        assert_eq!(visible[0].kind.css_class(), "alert-info");
    }

    #[test]
    fn test_dismiss_unknown_id_is_noop() {
        // テスト項目: 存在しない ID の dismiss は何もしない
        // given (前提条件):
        let mut tray = AlertTray::new();
        let id = tray.push(AlertKind::Warning, "Careful", 0);

        // when (操作):
        tray.dismiss(id + 100);

        // then (期待する結果):
        assert_eq!(tray.visible(0).len(), 1);
    }
}
