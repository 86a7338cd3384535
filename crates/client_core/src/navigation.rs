use std::sync::{Mutex, PoisonError};

/// Page location as seen by the host (browser location, console state).
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// Navigator that only records where it was sent.
pub struct MemoryNavigator {
    inner: Mutex<NavigationLog>,
}

struct NavigationLog {
    current: String,
    history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(NavigationLog {
                current: initial_path.into(),
                history: Vec::new(),
            }),
        }
    }

    /// Every navigation performed, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .history
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    fn navigate(&self, path: &str) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.current = path.to_string();
        guard.history.push(path.to_string());
    }
}
