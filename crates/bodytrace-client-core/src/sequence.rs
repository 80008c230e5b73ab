use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Identifies one request issued by a [`RequestSequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SequenceTag(u64);

/// Monotonic counter used to discard responses to superseded requests
///
/// Each screen data slot owns one. Tag every request with [`Self::issue`]
/// and only apply a response if [`Self::is_latest`] still holds for its tag.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: Arc<AtomicU64>,
}

impl RequestSequence {
    pub fn issue(&self) -> SequenceTag {
        SequenceTag(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, tag: SequenceTag) -> bool {
        self.latest.load(Ordering::SeqCst) == tag.0
    }

    /// Makes every outstanding tag stale without issuing a new one
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
