/// Event for panels that mirror editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Transient text for a status line.
    Message(String),
    /// Model contents changed, lists and property panels should refresh.
    ContentChanged,
    /// The active floor changed.
    FloorChanged { level: u32 },
}

impl Notification {
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl<F> NotificationSink for F
where
    F: FnMut(Notification),
{
    fn notify(&mut self, notification: Notification) {
        self(notification);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Message(text) => log::info!("{text}"),
            other => log::debug!("{other:?}"),
        }
    }
}
