//! Terminal stand-ins for the browser's location bar.

use std::sync::{Mutex, PoisonError};

use client_core::Navigator;
use tracing::info;

pub struct ConsoleNavigator {
    current: Mutex<String>,
}

impl ConsoleNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial_path.into()),
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn current_path(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, path: &str) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != path {
            info!(from = %current, to = path, "navigate");
        }
        *current = path.to_string();
    }
}
