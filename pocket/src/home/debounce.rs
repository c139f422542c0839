use std::time::{Duration, Instant};

/// Cancellable one-shot timer holding the latest staged value.
///
/// Staging a value replaces whatever was pending and restarts the quiet
/// period; the value is released by [`Debouncer::poll`] once the period has
/// elapsed without another stage.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn stage(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the staged value if its quiet period is over
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[test]
    fn releases_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.stage(1, start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(399)), None);
        assert_eq!(debouncer.poll(start + DELAY), Some(1));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + DELAY * 2), None);
    }

    #[test]
    fn rapid_stages_coalesce_into_the_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.stage("a", start);
        debouncer.stage("b", start + Duration::from_millis(150));
        debouncer.stage("c", start + Duration::from_millis(300));

        // 400ms after the first stage is not enough: the timer restarted
        assert_eq!(debouncer.poll(start + DELAY), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(700))
        );

        let mut released = Vec::new();
        for ms in (0..=1000).step_by(50) {
            if let Some(v) = debouncer.poll(start + Duration::from_millis(ms)) {
                released.push(v);
            }
        }
        assert_eq!(released, vec!["c"]);
    }

    #[test]
    fn cancel_drops_the_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.stage(7, start);
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + DELAY), None);
    }
}
