/// Lifecycle of one logical fetch (initial load, a search, a day's records).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl FetchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchPhase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchPhase::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Issued when a fetch starts; results are applied only while the token is
/// still the newest one for that fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchToken(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    pub fn next(&mut self) -> FetchToken {
        self.current = self.current.wrapping_add(1);
        FetchToken(self.current)
    }

    /// Makes every outstanding token stale without starting a new fetch.
    pub fn invalidate(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        token.0 == self.current
    }
}
