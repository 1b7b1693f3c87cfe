//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - status: Device status wire format, snapshots and the derived countdown view
//! - power: Power action state and its derived view
//! - slideshow: Slideshow control commands and acknowledgements
//! - notification: Transient user-facing messages

pub mod notification;
pub mod power;
pub mod slideshow;
pub mod status;

pub use notification::*;
pub use power::*;
pub use slideshow::*;
pub use status::*;
