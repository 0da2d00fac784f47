use tracing::debug;

/// Observer for the raw request/response bodies a provider exchanges with
/// its backend. Handy when bringing up a new tracker integration.
///
/// Implementations must be cheap and must never fail the call they observe.
pub trait WireLog: Send + Sync {
    fn request(&self, url: &str, body: &str);
    fn response(&self, url: &str, body: &str);
}

/// Default sink: emits wire traffic as `tracing` debug events, so it stays
/// silent unless a subscriber opts in.
#[derive(Debug, Default)]
pub struct TracingWireLog;

impl WireLog for TracingWireLog {
    fn request(&self, url: &str, body: &str) {
        debug!(url, body, "request");
    }

    fn response(&self, url: &str, body: &str) {
        debug!(url, body, "response");
    }
}
