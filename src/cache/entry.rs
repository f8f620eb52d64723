use std::time::{Duration, Instant};

/// A stored value together with the time of the write that produced it.
///
/// Reads never touch the timestamp, and moving an entry between tiers keeps it as is.
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    value: V,
    written_at: Instant,
}

impl<V> Entry<V> {
    pub(crate) fn new(value: V) -> Self {
        Self {
            value,
            written_at: Instant::now(),
        }
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) fn is_expired(&self, expiration: Duration) -> bool {
        self.written_at.elapsed() > expiration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_is_fresh_right_after_the_write() {
        // when
        let entry = Entry::new("value");

        // then
        assert!(!entry.is_expired(Duration::from_secs(60)));
        assert_eq!(*entry.value(), "value");
    }

    #[test]
    fn it_expires_once_older_than_the_duration() {
        // given
        let entry = Entry::new(1);

        // when
        std::thread::sleep(Duration::from_millis(20));

        // then
        assert!(entry.is_expired(Duration::from_millis(1)));
        assert!(!entry.is_expired(Duration::from_secs(60)));
    }
}
