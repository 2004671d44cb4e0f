//! Event kinds: declaration trait and runtime identifiers.
//!
//! This module groups the **data model** shared by the registry, the dispatch
//! engine and the telemetry tracker.
//!
//! ## Contents
//! - [`Event`] declares a kind and its payload (one Rust type per kind)
//! - [`KindId`] comparable runtime identifier of a kind (type identity + name)
//!
//! ## Quick reference
//! - **Producers**: call [`Bus::publish`](crate::Bus::publish) with a value of the kind's type.
//! - **Consumers**: subscribe a [`Listener<E>`](crate::Listener) for the same type.
//! - **Operators**: read [`KindId`]s back from [`Bus::known_kinds`](crate::Bus::known_kinds)
//!   and [`Telemetry::get_all`](crate::Telemetry::get_all).

mod event;
mod kind;

pub use event::Event;
pub use kind::KindId;
