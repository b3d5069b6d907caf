use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out identifiers derived from the creation time in milliseconds.
///
/// Two ids created within the same millisecond would collide, so the
/// generator never returns a value less than or equal to one it (or
/// `observe`) has already seen.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a generator that will never reissue any of the given ids.
    /// Ids that are not decimal numbers are ignored.
    pub fn seeded_past<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let generator = Self::new();
        for id in ids {
            generator.observe(id);
        }
        generator
    }

    pub fn observe(&self, id: &str) {
        if let Ok(value) = id.parse::<u64>() {
            self.last.fetch_max(value, Ordering::SeqCst);
        }
    }

    pub fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}
