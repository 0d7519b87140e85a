use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A transient notification banner. Only one is shown at a time; raising a
/// new one replaces it.
#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    raised_at: Instant,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, AlertKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, AlertKind::Error)
    }

    fn new(message: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            message: message.into(),
            kind,
            raised_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_alert_is_not_expired() {
        let alert = Alert::success("Saved");
        assert!(!alert.is_expired(Instant::now(), Duration::from_secs(3)));
    }

    #[test]
    fn alert_expires_after_ttl() {
        let alert = Alert::error("boom");
        let later = Instant::now() + Duration::from_secs(4);
        assert!(alert.is_expired(later, Duration::from_secs(3)));
    }
}
