//! Stateful components of the core, each the single writer of its state

pub mod countdown;
pub mod power_action;
pub mod status_poller;
pub mod timers;

pub use countdown::CountdownReconciler;
pub use power_action::PowerActionController;
pub use status_poller::StatusPoller;
