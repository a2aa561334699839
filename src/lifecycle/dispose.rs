/// Holds a resource until the first [`dispose`](Self::dispose) call.
///
/// Later calls are no-ops, so teardown paths that may run more than once
/// (explicit unmount followed by drop, say) release the resource exactly
/// once.
#[derive(Debug)]
pub struct DisposeOnce<T> {
    inner: Option<T>,
}

impl<T> DisposeOnce<T> {
    /// Wrap a live resource.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { inner: Some(value) }
    }

    /// Drop the resource. Returns `true` only on the call that dropped it.
    pub fn dispose(&mut self) -> bool {
        self.inner.take().is_some()
    }

    /// Whether the resource has been disposed.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.inner.is_none()
    }

    /// Borrow the resource while live.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Mutably borrow the resource while live.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.as_mut()
    }
}
