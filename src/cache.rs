use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

struct Slot<T> {
    value: T,
    written_at: Instant,
}

/// Single-slot memoization with a fixed time-to-live.
///
/// A read hits only while `now - written_at < ttl`; an expired or empty slot
/// reports a miss and the caller repopulates. Writes replace the whole slot
/// and restart the window. Two callers that both observe a miss may both
/// refresh; the second write wins.
pub struct TtlCache<T> {
    slot: RwLock<Option<Slot<T>>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        TtlCache {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Current value if still fresh, `None` on a miss.
    pub async fn read(&self) -> Option<T> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|s| s.written_at.elapsed() < self.ttl)
            .map(|s| s.value.clone())
    }

    pub async fn write(&self, value: T) {
        let mut slot = self.slot.write().await;
        *slot = Some(Slot {
            value,
            written_at: Instant::now(),
        });
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
