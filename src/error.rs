//! Error types used by the bus and by listeners.
//!
//! This module defines two main error enums:
//!
//! - [`BusError`]: errors returned by bus operations (validation and dispatch).
//! - [`ListenerError`]: errors produced by a single listener invocation.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by the bus.
///
/// Validation errors (`InvalidKind`, `InvalidListener`, `InvalidPayload`) are always
/// returned to the direct caller before any registry or dispatch work happens.
/// `ListenerFailure` is only returned by strict inline passes.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// The event kind declares an empty (or whitespace-only) name.
    #[error("invalid event kind {kind:?}: name must not be empty")]
    InvalidKind {
        /// The rejected kind name, as declared.
        kind: &'static str,
    },

    /// The supplied listener cannot be invoked (e.g. a weak handle whose target is gone).
    #[error("invalid listener for kind '{kind}': {reason}")]
    InvalidListener {
        /// Kind the listener was supplied for.
        kind: &'static str,
        /// Why the listener was rejected.
        reason: &'static str,
    },

    /// The payload was rejected by its kind's validation.
    #[error("invalid payload for kind '{kind}': {reason}")]
    InvalidPayload {
        /// Kind being published.
        kind: &'static str,
        /// Reason reported by [`Event::validate`](crate::Event::validate).
        reason: String,
    },

    /// A listener failed during a strict inline dispatch pass.
    #[error("listener '{listener}' failed on kind '{kind}': {source}")]
    ListenerFailure {
        /// Kind being published.
        kind: &'static str,
        /// Listener name (see [`Listen::name`](crate::Listen::name)).
        listener: &'static str,
        /// The listener's own error.
        source: ListenerError,
    },

    /// Scheduled dispatch was requested outside a tokio runtime.
    #[error("scheduled dispatch of '{kind}' requires a tokio runtime")]
    NoRuntime {
        /// Kind being published.
        kind: &'static str,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::BusError;
    ///
    /// let err = BusError::InvalidKind { kind: "" };
    /// assert_eq!(err.as_label(), "bus_invalid_kind");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::InvalidKind { .. } => "bus_invalid_kind",
            BusError::InvalidListener { .. } => "bus_invalid_listener",
            BusError::InvalidPayload { .. } => "bus_invalid_payload",
            BusError::ListenerFailure { .. } => "bus_listener_failure",
            BusError::NoRuntime { .. } => "bus_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::InvalidKind { kind } => format!("invalid kind: {kind:?}"),
            BusError::InvalidListener { kind, reason } => {
                format!("invalid listener: kind={kind} reason={reason}")
            }
            BusError::InvalidPayload { kind, reason } => {
                format!("invalid payload: kind={kind} reason={reason}")
            }
            BusError::ListenerFailure {
                kind,
                listener,
                source,
            } => format!("listener failure: kind={kind} listener={listener} error={source}"),
            BusError::NoRuntime { kind } => format!("no runtime: kind={kind}"),
        }
    }

    /// Returns `true` for the validation family (`InvalidKind`, `InvalidListener`, `InvalidPayload`).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BusError::InvalidKind { .. }
                | BusError::InvalidListener { .. }
                | BusError::InvalidPayload { .. }
        )
    }
}

/// # Errors produced by a single listener invocation.
///
/// A listener either returns [`ListenerError::Failed`] itself or panics; the bus
/// converts a caught panic into [`ListenerError::Panicked`].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener reported a failure.
    #[error("{message}")]
    Failed {
        /// The underlying error message.
        message: String,
    },

    /// The listener panicked; the panic was caught by the bus.
    #[error("panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ListenerError {
    /// Builds a [`ListenerError::Failed`] from any message.
    ///
    /// # Example
    /// ```
    /// use eventvisor::ListenerError;
    ///
    /// let err = ListenerError::fail("disk full");
    /// assert_eq!(err.to_string(), "disk full");
    /// ```
    pub fn fail(message: impl Into<String>) -> Self {
        ListenerError::Failed {
            message: message.into(),
        }
    }

    /// Builds a [`ListenerError::Failed`] from another error's display text.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        ListenerError::fail(err.to_string())
    }

    /// Builds a [`ListenerError::Panicked`] from a caught panic payload.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let info = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        ListenerError::Panicked { info }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { message } => format!("error: {message}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            BusError::InvalidPayload {
                kind: "x",
                reason: "empty".into()
            }
            .as_label(),
            "bus_invalid_payload"
        );
        assert_eq!(BusError::NoRuntime { kind: "x" }.as_label(), "bus_no_runtime");
        assert_eq!(ListenerError::fail("boom").as_label(), "listener_failed");
    }

    #[test]
    fn test_validation_family() {
        assert!(BusError::InvalidKind { kind: "" }.is_validation());
        assert!(!BusError::ListenerFailure {
            kind: "x",
            listener: "l",
            source: ListenerError::fail("boom"),
        }
        .is_validation());
    }

    #[test]
    fn test_panic_payload_extraction() {
        let s: Box<dyn std::any::Any + Send> = Box::new("static str");
        assert_eq!(
            ListenerError::from_panic(s.as_ref()),
            ListenerError::Panicked {
                info: "static str".into()
            }
        );

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(
            ListenerError::from_panic(owned.as_ref()),
            ListenerError::Panicked {
                info: "owned".into()
            }
        );

        let other: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(
            ListenerError::from_panic(other.as_ref()),
            ListenerError::Panicked {
                info: "unknown panic".into()
            }
        );
    }

    #[test]
    fn test_listener_failure_display() {
        let err = BusError::ListenerFailure {
            kind: "selection.changed",
            listener: "outline",
            source: ListenerError::fail("boom"),
        };
        assert_eq!(
            err.to_string(),
            "listener 'outline' failed on kind 'selection.changed': boom"
        );
    }
}
