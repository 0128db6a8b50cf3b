use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Notify, Semaphore};

/// Holds stubbed calls in flight until the test releases them.
///
/// An open gate lets every call through. Once [`Gate::hold`] is called, each call waits for a
/// permit handed out by [`Gate::release`].
#[derive(Debug)]
pub struct Gate {
    held: AtomicBool,
    permits: Semaphore,
    entered: AtomicUsize,
    notify: Notify,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            held: AtomicBool::new(false),
            permits: Semaphore::new(0),
            entered: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }
}

impl Gate {
    /// Makes subsequent calls wait for [`Gate::release`].
    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Lets `n` waiting (or future) calls through.
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }

    /// Number of calls that reached the stub so far.
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    /// Waits until at least `n` calls reached the stub.
    pub async fn wait_entered(&self, n: usize) {
        loop {
            let notified = self.notify.notified();
            if self.entered() >= n {
                return;
            }
            notified.await;
        }
    }

    pub(crate) async fn pass(&self) {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();
        if self.held.load(Ordering::SeqCst) {
            match self.permits.acquire().await {
                Ok(permit) => permit.forget(),
                Err(_) => trace!("gate closed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Duration};

    #[tokio::test]
    async fn holds_until_released() {
        let gate = Arc::new(Gate::default());
        gate.hold();

        let inner = gate.clone();
        let handle = tokio::spawn(async move { inner.pass().await });
        gate.wait_entered(1).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        gate.release(1);
        handle.await.unwrap();
    }
}
