#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

/// ERROR and WARN events logged while a closure ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogCounts {
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Clone, Default)]
struct LevelCounter {
    errors: Arc<AtomicUsize>,
    warnings: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for LevelCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level == Level::ERROR {
            self.errors.fetch_add(1, Ordering::SeqCst);
        } else if level == Level::WARN {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` on the current thread and count the ERROR and WARN events it logs.
pub fn count_logs<T>(f: impl FnOnce() -> T) -> (T, LogCounts) {
    let counter = LevelCounter::default();
    let subscriber = Registry::default().with(counter.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let counts = LogCounts {
        errors: counter.errors.load(Ordering::SeqCst),
        warnings: counter.warnings.load(Ordering::SeqCst),
    };
    (out, counts)
}

/// Run `f` and return its result together with the number of errors it logged.
pub fn count_errors<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let (out, counts) = count_logs(f);
    (out, counts.errors)
}
