//! Per-thread log capture for solver tests
//!
//! Installs a process-wide `log` backend on first use. Only threads inside
//! [`captured`] keep their records, so tests running in parallel only see
//! their own.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Option<Vec<(Level, String)>>> = RefCell::new(None);
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|records| {
            if let Some(records) = records.borrow_mut().as_mut() {
                records.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return its value with every record it logged on this thread
pub(crate) fn captured<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in core tests");
        log::set_max_level(LevelFilter::Trace);
    });

    RECORDS.with(|records| *records.borrow_mut() = Some(Vec::new()));
    let value = f();
    let records = RECORDS.with(|records| records.borrow_mut().take()).unwrap_or_default();
    (value, records)
}
