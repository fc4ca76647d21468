use crate::squeezer::SqueezeTicket;

/// Side effects the event loop performs on behalf of the handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Arm the completion timer for a squeeze that just started.
    ScheduleSqueeze { ticket: SqueezeTicket },
    /// Abort every armed completion timer.
    CancelSqueezes,
    Quit,
}
