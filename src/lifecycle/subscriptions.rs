/// A set of teardown closures, one per registered listener.
///
/// Closures run in reverse registration order on [`release`] or on drop,
/// whichever happens first. Each runs at most once.
///
/// [`release`]: Subscriptions::release
#[derive(Default)]
pub struct Subscriptions {
    teardowns: Vec<Box<dyn FnOnce()>>,
}

impl Subscriptions {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the teardown for one subscription.
    pub fn push(&mut self, teardown: impl FnOnce() + 'static) {
        self.teardowns.push(Box::new(teardown));
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teardowns.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teardowns.is_empty()
    }

    /// Run every teardown, newest first. Returns how many ran.
    pub fn release(&mut self) -> usize {
        let count = self.teardowns.len();
        while let Some(teardown) = self.teardowns.pop() {
            teardown();
        }
        if count > 0 {
            log::debug!("released {count} subscriptions");
        }
        count
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("len", &self.teardowns.len())
            .finish()
    }
}
