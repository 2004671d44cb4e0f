//! # Listeners: the consumer side of the bus.
//!
//! A listener is anything implementing [`Listen<E>`]: a struct with its own
//! state, or a plain closure `Fn(&E) -> ListenerResult`. The bus stores
//! listeners behind [`Listener<E>`] handles, whose `Arc` identity is the
//! listener's identity.
//!
//! ## Architecture
//! ```text
//!   impl Listen<E> / closure
//!            │
//!            ▼
//!      Listener<E>  (Arc<dyn Listen<E>>, clones share identity)
//!            │ downgrade()
//!            ▼
//!    WeakListener<E> (Weak<dyn Listen<E>>, does not keep the target alive)
//! ```
//!
//! ## Implementing a listener
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use eventvisor::{Event, Listen, ListenerResult};
//!
//! struct Saved;
//! impl Event for Saved {
//!     const KIND: &'static str = "document.saved";
//! }
//!
//! #[derive(Default)]
//! struct SaveCounter(AtomicUsize);
//!
//! impl Listen<Saved> for SaveCounter {
//!     fn on_event(&self, _ev: &Saved) -> ListenerResult {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "save-counter"
//!     }
//! }
//! ```

mod listener;

pub use listener::{Listen, Listener, ListenerResult, WeakListener};
