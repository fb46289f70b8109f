use std::fmt;

/// Notification seam toward a form-framework integration. The pickers
/// call the notify hooks on every completed selection; what the hooks do
/// with the value is the registrant's business. Both default to no-ops
/// until something registers.
pub struct FormBinding<T> {
    on_change: Option<Box<dyn FnMut(&T)>>,
    on_touched: Option<Box<dyn FnMut()>>,
}

impl<T> Default for FormBinding<T> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_touched: None,
        }
    }
}

impl<T> FormBinding<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_on_change(&mut self, callback: impl FnMut(&T) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn register_on_touched(&mut self, callback: impl FnMut() + 'static) {
        self.on_touched = Some(Box::new(callback));
    }

    pub fn notify_change(&mut self, value: &T) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }

    pub fn notify_touched(&mut self) {
        if let Some(callback) = self.on_touched.as_mut() {
            callback();
        }
    }
}

impl<T> fmt::Debug for FormBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormBinding")
            .field("on_change", &self.on_change.is_some())
            .field("on_touched", &self.on_touched.is_some())
            .finish()
    }
}
