//! Pending-render token.

use std::cell::Cell;

use tokio::sync::watch;

/// Generation-counted gate over tree replacement.
///
/// `begin` hands out the next generation, `settle` publishes it, and
/// `settled` waits until every generation handed out before the call has
/// been published. Readers of the tree wait here instead of racing an
/// in-flight replacement; a newer `begin` supersedes an unsettled older
/// one, so late waiters always see the newest tree.
#[derive(Debug)]
pub struct RenderGate {
    published: watch::Sender<u64>,
    pending: Cell<u64>,
}

/// Token for one in-flight tree replacement.
#[derive(Debug)]
#[must_use = "an unsettled token blocks every waiter"]
pub struct RenderToken {
    generation: u64,
}

impl RenderGate {
    pub fn new() -> Self {
        Self {
            published: watch::Sender::new(0),
            pending: Cell::new(0),
        }
    }

    /// Mark a replacement as in flight.
    pub fn begin(&self) -> RenderToken {
        let generation = self.pending.get() + 1;
        self.pending.set(generation);
        RenderToken { generation }
    }

    /// Mark a replacement as applied and wake waiters.
    pub fn settle(&self, token: RenderToken) {
        self.published
            .send_modify(|latest| *latest = (*latest).max(token.generation));
    }

    /// Wait for the replacement that was pending at call time. Resolves
    /// immediately when nothing is in flight.
    pub async fn settled(&self) {
        let target = self.pending.get();
        let mut published = self.published.subscribe();
        // Cannot fail: the sender lives as long as the gate.
        let _ = published.wait_for(|latest| *latest >= target).await;
    }
}

impl Default for RenderGate {
    fn default() -> Self {
        Self::new()
    }
}
