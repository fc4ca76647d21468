use crate::squeezer::{SqueezeTicket, StoreChange};
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Forwarded by the store observer after every applied mutation
    Store(StoreChange),

    /// A squeeze timer fired
    SqueezeElapsed(SqueezeTicket),

    /// Tick for UI refresh
    Tick,
}
