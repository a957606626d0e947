//! Tracing Navigator
//!
//! Implements Navigator for hosts without a router: the requested route is
//! logged and remembered.

use crate::domain::ports::Navigator;
use parking_lot::Mutex;

/// Navigator that records the most recent route.
#[derive(Default)]
pub struct TracingNavigator {
    current: Mutex<Option<String>>,
}

impl TracingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last route requested, if any.
    pub fn current(&self) -> Option<String> {
        self.current.lock().clone()
    }
}

impl Navigator for TracingNavigator {
    fn navigate_to(&self, path: &str) {
        tracing::info!("navigating to {}", path);
        *self.current.lock() = Some(path.to_string());
    }
}
