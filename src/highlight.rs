//! Transient highlight-and-scroll aid for deep-linked rows.
//!
//! Requirement and approval pages arrive with `highlight_id`/`scroll_to`
//! parameters; the aid locates the row, scrolls it into view and applies a
//! highlight that clears itself after a fixed duration. The row may not be
//! rendered yet when the page lands, so location is retried a bounded number
//! of times.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::DEFAULT_HIGHLIGHT_MS;

/// Side-effect boundary the view layer injects for row location and styling.
pub trait ScrollPort: Send + Sync {
    /// Attempts to bring the row identified by `target` into view. Returns
    /// `false` when the row is not rendered yet.
    fn scroll_to(&self, target: &str) -> bool;
    fn apply_highlight(&self, target: &str);
    fn clear_highlight(&self, target: &str);
}

#[derive(Clone, Debug)]
pub struct HighlightConfig {
    /// How long the highlight stays applied.
    pub duration: Duration,
    /// Pause between attempts to locate a row that is not rendered yet.
    pub retry_interval: Duration,
    /// Location attempts before giving up on an absent row.
    pub max_attempts: u32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_HIGHLIGHT_MS),
            retry_interval: Duration::from_millis(200),
            max_attempts: 25,
        }
    }
}

struct ActiveState {
    current: Option<String>,
    generation: u64,
}

/// Drives at most one active highlight at a time.
///
/// Engaging the already-active target is a no-op; engaging a different one
/// clears the previous highlight first. Every path clears the active marker,
/// so no highlight outlives its timer.
#[derive(Clone)]
pub struct Highlighter {
    port: Arc<dyn ScrollPort>,
    config: HighlightConfig,
    active: Arc<Mutex<ActiveState>>,
}

impl Highlighter {
    pub fn new(port: Arc<dyn ScrollPort>, config: HighlightConfig) -> Self {
        Self {
            port,
            config,
            active: Arc::new(Mutex::new(ActiveState {
                current: None,
                generation: 0,
            })),
        }
    }

    /// Scrolls to and highlights `target`. Must be called inside a Tokio
    /// runtime; the locate/clear timing runs as a background task.
    pub fn engage(&self, target: &str) {
        let generation = {
            let mut state = self.lock();
            if state.current.as_deref() == Some(target) {
                return;
            }
            if let Some(previous) = state.current.take() {
                self.port.clear_highlight(&previous);
            }
            state.generation += 1;
            state.current = Some(target.to_string());
            state.generation
        };

        let this = self.clone();
        let target = target.to_string();
        tokio::spawn(async move {
            this.run(generation, target).await;
        });
    }

    async fn run(&self, generation: u64, target: String) {
        let mut attempts = 0;
        loop {
            if self.superseded(generation) {
                return;
            }
            if self.port.scroll_to(&target) {
                break;
            }
            attempts += 1;
            if attempts >= self.config.max_attempts {
                log::debug!("highlight target never rendered: {target}");
                self.release(generation);
                return;
            }
            tokio::time::sleep(self.config.retry_interval).await;
        }

        self.port.apply_highlight(&target);
        tokio::time::sleep(self.config.duration).await;
        if self.release(generation) {
            self.port.clear_highlight(&target);
        }
    }

    fn superseded(&self, generation: u64) -> bool {
        self.lock().generation != generation
    }

    /// Clears the active marker if this task still owns it.
    fn release(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.generation == generation {
            state.current = None;
            true
        } else {
            false
        }
    }

    fn lock(&self) -> MutexGuard<'_, ActiveState> {
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::{Duration, advance};

    use super::*;

    #[derive(Default)]
    struct RecordingPort {
        /// Rows exist only after this many location attempts.
        visible_after: AtomicU32,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingPort {
        fn log(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ScrollPort for RecordingPort {
        fn scroll_to(&self, target: &str) -> bool {
            if self.visible_after.load(Ordering::SeqCst) > 0 {
                self.visible_after.fetch_sub(1, Ordering::SeqCst);
                return false;
            }
            self.log(format!("scroll:{target}"));
            true
        }

        fn apply_highlight(&self, target: &str) {
            self.log(format!("on:{target}"));
        }

        fn clear_highlight(&self, target: &str) {
            self.log(format!("off:{target}"));
        }
    }

    fn fast_config() -> HighlightConfig {
        HighlightConfig {
            duration: Duration::from_millis(3500),
            retry_interval: Duration::from_millis(200),
            max_attempts: 5,
        }
    }

    /// Steps paused time forward in small increments, yielding between
    /// steps so tasks woken by one timer get to register the next.
    async fn run_for(ms: u64) {
        for _ in 0..ms.div_ceil(50) {
            advance(Duration::from_millis(50)).await;
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_applies_and_self_clears() {
        let port = Arc::new(RecordingPort::default());
        let aid = Highlighter::new(port.clone(), fast_config());

        aid.engage("req-7");
        tokio::task::yield_now().await;
        assert_eq!(port.calls(), vec!["scroll:req-7", "on:req-7"]);

        run_for(3600).await;
        assert_eq!(port.calls(), vec!["scroll:req-7", "on:req-7", "off:req-7"]);
    }

    #[tokio::test(start_paused = true)]
    async fn engaging_the_active_target_is_a_no_op() {
        let port = Arc::new(RecordingPort::default());
        let aid = Highlighter::new(port.clone(), fast_config());

        aid.engage("req-7");
        tokio::task::yield_now().await;
        aid.engage("req-7");
        tokio::task::yield_now().await;

        assert_eq!(port.calls(), vec!["scroll:req-7", "on:req-7"]);
    }

    #[tokio::test(start_paused = true)]
    async fn new_target_replaces_the_previous_highlight() {
        let port = Arc::new(RecordingPort::default());
        let aid = Highlighter::new(port.clone(), fast_config());

        aid.engage("req-7");
        tokio::task::yield_now().await;
        aid.engage("req-9");
        tokio::task::yield_now().await;

        assert_eq!(
            port.calls(),
            vec!["scroll:req-7", "on:req-7", "off:req-7", "scroll:req-9", "on:req-9"]
        );

        // Only the newer timer clears anything further.
        run_for(3600).await;
        let calls = port.calls();
        assert_eq!(calls.last().unwrap(), "off:req-9");
        assert_eq!(calls.iter().filter(|c| *c == "off:req-7").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_row_to_render() {
        let port = Arc::new(RecordingPort::default());
        port.visible_after.store(3, Ordering::SeqCst);
        let aid = Highlighter::new(port.clone(), fast_config());

        aid.engage("req-7");
        tokio::task::yield_now().await;
        assert!(port.calls().is_empty());

        run_for(700).await;
        assert_eq!(port.calls(), vec!["scroll:req-7", "on:req-7"]);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_on_a_row_that_never_renders() {
        let port = Arc::new(RecordingPort::default());
        port.visible_after.store(u32::MAX, Ordering::SeqCst);
        let aid = Highlighter::new(port.clone(), fast_config());

        aid.engage("req-404");
        run_for(2000).await;
        assert!(port.calls().is_empty());

        // The marker was released: the same target can be engaged again.
        port.visible_after.store(0, Ordering::SeqCst);
        aid.engage("req-404");
        tokio::task::yield_now().await;
        assert_eq!(port.calls(), vec!["scroll:req-404", "on:req-404"]);
    }
}
