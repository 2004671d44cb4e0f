//! Bus core: registry, dispatch engine and configuration.
//!
//! The only public entry point from this module is [`Bus`]; everything else
//! is either an option type or an internal building block.
//!
//! Internal modules:
//! - [`registry`]: kind → ordered listener set, with lazy weak reclamation;
//! - [`dispatch`]: inline and scheduled passes over a listener snapshot;
//! - [`bus`]: the public handle wiring registry, dispatch, telemetry and logging;
//! - [`builder`]: optional collaborators at construction time;
//! - [`subscription`]: unsubscribe handle.

mod builder;
#[allow(clippy::module_inception)]
mod bus;
mod config;
mod dispatch;
mod options;
mod registry;
mod subscription;

pub use builder::BusBuilder;
pub use bus::Bus;
pub use config::Config;
pub use options::{DispatchMode, PublishOptions, SubscribeOptions};
pub use subscription::Subscription;
