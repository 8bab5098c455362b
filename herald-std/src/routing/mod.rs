//! # Journal routing
//!
//! - [`Router`]: the process-wide listener registry and publish loop.
//! - [`Broadcaster`]: a path-bound publishing handle for one subsystem.
//!
//! # Choosing an entry point
//!
//! | Type | Use Case |
//! |------|----------|
//! | `Router` | Startup code registering listeners |
//! | `Broadcaster` | Subsystems emitting events below their own path |

pub mod broadcaster;
pub mod router;

pub use broadcaster::Broadcaster;
pub use router::{Delivery, Router};
