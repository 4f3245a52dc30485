//! Commands: work an application hands back to the runtime to execute off
//! the main loop, posting its result back in as an [`Event`].

use std::future::Future;
use std::pin::Pin;

use crate::event::Event;

/// A unit of asynchronous work, spawned by the runtime and awaited off the
/// main loop. Its output becomes an [`Event`] delivered back through the
/// same channel as input/timer events, so the application never observes
/// command execution directly — only its eventual result.
pub struct Command {
    future: Pin<Box<dyn Future<Output = Event> + Send + 'static>>,
}

impl Command {
    /// Wrap an async block producing an [`Event`] as a command.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Event> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// A command that resolves immediately to `event`, useful for tests
    /// and for an application that wants to post a follow-up event without
    /// genuinely asynchronous work.
    pub fn immediate(event: Event) -> Self {
        Self::new(async move { event })
    }

    pub(crate) fn into_future(self) -> Pin<Box<dyn Future<Output = Event> + Send + 'static>> {
        self.future
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn immediate_resolves_to_given_event() {
        let cmd = Command::immediate(Event::Resize(10, 5));
        let event = cmd.into_future().await;
        assert!(matches!(event, Event::Resize(10, 5)));
    }
}
