//! Navigator Port

/// Route changes requested by the form.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}
