//! Synchronous observer-list event

/// A list of listeners invoked synchronously, in registration order,
/// every time the event is raised.
#[derive(Default)]
pub struct Event {
    listeners: Vec<Box<dyn FnMut()>>,
}

impl Event {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener. There is no removal; events in Ember are
    /// one-shot notifications owned by the object that raises them.
    pub fn add_listener<F: FnMut() + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    /// Invoke every listener once.
    pub fn raise(&mut self) {
        for listener in &mut self.listeners {
            listener();
        }
    }

    pub fn num_listeners(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
