//! Explicit logging handle.
//!
//! No global subscriber is installed. The entry point builds one [`Logger`],
//! components enter it around their logging, and all events from all threads
//! land in one `Mutex`-guarded writer, one line at a time.

use std::{io, sync::Mutex};

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Logs to stdout, filtered by `RUST_LOG` (default `info`).
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: io::Write + Send + 'static>(writer: W) -> Self {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(writer))
            .with_ansi(false)
            .with_target(false)
            .finish();
        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Discards everything.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Runs `f` with this logger receiving its events, on the current thread.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Shared {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn events_reach_the_writer_only_inside_scope() {
        let sink = Shared::default();
        let logger = Logger::with_writer(sink.clone());

        tracing::info!("outside");
        logger.scope(|| tracing::info!(bytes = 96, "wrote to FPGA"));

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("wrote to FPGA"));
        assert!(text.contains("bytes=96"));
        assert!(!text.contains("outside"));
    }

    #[test]
    fn lines_from_threads_do_not_interleave() {
        let sink = Shared::default();
        let logger = Logger::with_writer(sink.clone());

        std::thread::scope(|s| {
            for thread in 0..4 {
                let logger = &logger;
                s.spawn(move || {
                    for line in 0..50 {
                        logger.scope(|| tracing::info!(thread, line, "transfer"));
                    }
                });
            }
        });

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.lines().count(), 200);
        assert!(text.lines().all(|line| line.contains("transfer")));
    }
}
