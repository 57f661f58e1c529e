use log::{Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Keep only the most recent messages
const MAX_BUFFERED: usize = 100;

/// `log` sink that buffers formatted messages for the side pane instead of writing to the raw-mode terminal
pub struct TuiLogger {
    log_buffer: Arc<Mutex<Vec<String>>>,
}

impl TuiLogger {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (
            TuiLogger {
                log_buffer: log_buffer.clone(),
            },
            log_buffer,
        )
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("{}", record.args());
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg);
                if buffer.len() > MAX_BUFFERED {
                    buffer.remove(0);
                }
            }
        }
    }

    fn flush(&self) {}
}
