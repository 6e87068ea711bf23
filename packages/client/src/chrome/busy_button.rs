//! Submit buttons that show a spinner for a fixed time after being clicked.

/// The button is restored this long after the click
pub const BUSY_DURATION_MS: i64 = 3000;
pub const LOADING_LABEL: &str =
    r#"<span class="spinner-border spinner-border-sm me-2"></span>Loading..."#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyButton {
    original_label: String,
    label: String,
    disabled: bool,
    restore_at: Option<i64>,
}

impl BusyButton {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            original_label: label.clone(),
            label,
            disabled: false,
            restore_at: None,
        }
    }

    /// Swap to the loading label and disable. Clicks while busy are ignored.
    pub fn click(&mut self, now: i64) {
        if self.disabled {
            return;
        }
        self.label = LOADING_LABEL.to_string();
        self.disabled = true;
        self.restore_at = Some(now + BUSY_DURATION_MS);
    }

    /// Restore the original label once the busy period is over
    pub fn tick(&mut self, now: i64) {
        if let Some(restore_at) = self.restore_at
            && now >= restore_at
        {
            self.label = self.original_label.clone();
            self.disabled = false;
            self.restore_at = None;
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}
