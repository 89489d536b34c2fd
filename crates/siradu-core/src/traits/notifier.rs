//! Notification sink trait.

/// Sink for human-readable success and error messages.
///
/// The dispatcher calls these for non-silent requests; implementations
/// surface them however the front end presents transient messages
/// (toasts in the console, stderr lines in a terminal). Calls must not
/// block: they happen on the request path.
pub trait Notifier: Send + Sync {
    /// Surface a success message.
    fn success(&self, message: &str);

    /// Surface an error message.
    fn error(&self, message: &str);
}

/// A notifier that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
