//! Where rejected operations are reported.

/// Receives the message of every rejected session operation.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Forwards notifications to `log::warn!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Collects messages in order. Handy for tests and batch tools.
impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
