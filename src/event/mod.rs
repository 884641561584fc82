// Event-driven presentation boundary
//
// The controller publishes facts about the session here; renderers, loggers and
// tests subscribe without the controller knowing who is listening.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::GameEvent;
pub use handler::{EventError, GameEventHandler, TracingEventHandler};
pub use subscription::GameSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod subscription;
