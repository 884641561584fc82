// Public API
pub use controller::{GameController, GameControllerBuilder, RoundAdvance};
pub use errors::{ErrorKind, GameError};
pub use session::{GameSession, GameStatus};

// Internal modules
mod controller;
mod errors;
mod session;
