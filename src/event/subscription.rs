use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{bus::EventBus, handler::GameEventHandler};

/// Routes events from the bus to a single handler on a background task
pub struct GameSubscription {
    handler: Arc<dyn GameEventHandler>,
    event_bus: EventBus,
}

impl GameSubscription {
    pub fn new(handler: Arc<dyn GameEventHandler>, event_bus: EventBus) -> Self {
        Self { handler, event_bus }
    }

    /// Start the subscription.
    ///
    /// The receiver is registered before this returns, so every event emitted
    /// afterwards reaches the handler. The task ends once every sender is gone.
    pub fn start(self) -> JoinHandle<()> {
        let handler_name = self.handler.name();
        let mut receiver = self.event_bus.subscribe();
        let handler = self.handler;
        drop(self.event_bus);

        info!(handler = handler_name, "Starting game event subscription");

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        debug!(
                            handler = handler_name,
                            event_type = event.event_type(),
                            "Received game event"
                        );

                        if let Err(e) = handler.handle(&event).await {
                            warn!(
                                handler = handler_name,
                                error = %e,
                                retryable = e.is_retryable(),
                                "Game event handler failed"
                            );
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(handler = handler_name, skipped, "Subscriber lagged behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            debug!(handler = handler_name, "Game event subscription ended");
        })
    }
}
