//! Values fetched by read-only calls.

use parking_lot::Mutex;

#[derive(Debug)]
struct State<T> {
    value: Option<T>,
    error: Option<String>,
    loading: bool,
}

/// The last value a panel fetched, plus the outcome of the latest attempt.
///
/// A failed fetch records its error but keeps the previous value on display.
#[derive(Debug)]
pub struct Cached<T> {
    state: Mutex<State<T>>,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self { state: Mutex::new(State { value: None, error: None, loading: false }) }
    }
}

impl<T: Clone> Cached<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that already holds `value`.
    pub fn with_value(value: T) -> Self {
        let cached = Self::default();
        cached.state.lock().value = Some(value);
        cached
    }

    pub fn value(&self) -> Option<T> {
        self.state.lock().value.clone()
    }

    /// The error of the latest attempt, cleared by the next successful one.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub(crate) fn start(&self) {
        self.state.lock().loading = true;
    }

    pub(crate) fn store(&self, value: T) {
        let mut state = self.state.lock();
        state.value = Some(value);
        state.error = None;
        state.loading = false;
    }

    pub(crate) fn fail(&self, error: String) {
        let mut state = self.state.lock();
        state.error = Some(error);
        state.loading = false;
    }
}
