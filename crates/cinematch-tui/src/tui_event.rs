use cinematch_core::{Movie, Service};

/// Commands sent from the TUI to the backend task that owns the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Startup and "home": fetch the popular list.
    LoadPopular,
    Search(String),
    SelectMovie(Movie),
    /// Leave the details view.
    Back,
}

/// Events flowing from background tasks to the TUI. Session state itself
/// arrives over the controller's watch channel, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// Result of the startup health probe for one service.
    Health { service: Service, healthy: bool },
}
