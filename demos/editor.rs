//! # Editor Events Example
//!
//! Wires a tiny editor: a selection producer, an outline panel, a status bar
//! and an export pipeline, all talking through one explicitly passed bus.
//!
//! Shows:
//! - idempotent subscriptions and unsubscribe handles
//! - strict vs best-effort delivery
//! - once and weak listeners
//!
//! ## Run
//! ```bash
//! cargo run --example editor
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use eventvisor::{
    Bus, Config, Event, Listener, ListenerError, PublishOptions, SubscribeOptions,
};

#[derive(Debug, Clone)]
struct SelectionChanged {
    path: String,
    start: usize,
    end: usize,
}

impl Event for SelectionChanged {
    const KIND: &'static str = "selection.changed";

    fn validate(&self) -> Result<(), String> {
        if self.start > self.end {
            return Err(format!("start {} after end {}", self.start, self.end));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct ExportCompleted {
    target: String,
    bytes: u64,
}

impl Event for ExportCompleted {
    const KIND: &'static str = "export.completed";
}

struct Outline {
    refreshes: AtomicUsize,
}

impl eventvisor::Listen<SelectionChanged> for Outline {
    fn on_event(&self, ev: &SelectionChanged) -> eventvisor::ListenerResult {
        let n = self.refreshes.fetch_add(1, Ordering::Relaxed) + 1;
        println!(" ├─► outline: refresh #{n} for {}:{}..{}", ev.path, ev.start, ev.end);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "outline"
    }
}

fn wire_status_bar(bus: &Bus) -> Result<eventvisor::Subscription, eventvisor::BusError> {
    bus.subscribe_fn(|ev: &SelectionChanged| {
        println!(" ├─► status-bar: {} chars selected", ev.end - ev.start);
        Ok(())
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eventvisor=info")),
        )
        .init();

    // Composition root: the only place a bus is created.
    let bus = Bus::builder(Config::default()).build();

    let outline = Listener::new(Outline {
        refreshes: AtomicUsize::new(0),
    });
    bus.subscribe(&outline)?;
    bus.subscribe(&outline)?; // idempotent
    let status = wire_status_bar(&bus)?;

    println!("selection:");
    bus.emit(SelectionChanged {
        path: "src/main.rs".into(),
        start: 10,
        end: 42,
    })?;

    println!("invalid selection:");
    if let Err(e) = bus.emit(SelectionChanged {
        path: "src/main.rs".into(),
        start: 9,
        end: 1,
    }) {
        println!(" └─► rejected: {e}");
    }

    status.unsubscribe();
    println!("listeners for selection: {}", bus.listener_count::<SelectionChanged>());

    // Export pipeline: one flaky uploader among healthy listeners.
    let toasts = Arc::new(AtomicUsize::new(0));
    let t = toasts.clone();
    bus.subscribe(&Listener::named("toast", move |ev: &ExportCompleted| {
        t.fetch_add(1, Ordering::Relaxed);
        println!(" ├─► toast: exported {} bytes to {}", ev.bytes, ev.target);
        Ok(())
    }))?;
    bus.subscribe_with(
        &Listener::named("uploader", |_: &ExportCompleted| {
            Err(ListenerError::fail("upload endpoint offline"))
        }),
        SubscribeOptions::new().priority(10),
    )?;
    bus.subscribe_once(&Listener::named("first-export-tip", |_: &ExportCompleted| {
        println!(" ├─► tip: exports are also available from the command palette");
        Ok(())
    }))?;

    println!("export (strict):");
    if let Err(e) = bus.emit(ExportCompleted {
        target: "out.png".into(),
        bytes: 2048,
    }) {
        println!(" └─► aborted: {e}");
    }

    println!("export (best effort):");
    bus.publish(
        ExportCompleted {
            target: "out.png".into(),
            bytes: 2048,
        },
        PublishOptions::new().continue_on_error(),
    )?;
    println!(" └─► toasts shown: {}", toasts.load(Ordering::Relaxed));

    // A panel that closes drops its listener; a weak subscription just goes quiet.
    {
        let preview = Listener::named("preview", |ev: &SelectionChanged| {
            println!(" ├─► preview: {}", ev.path);
            Ok(())
        });
        bus.subscribe_with(&preview, SubscribeOptions::new().weak())?;
        println!("selection with preview open:");
        bus.emit(SelectionChanged {
            path: "README.md".into(),
            start: 0,
            end: 5,
        })?;
    }
    println!("selection with preview closed:");
    bus.emit(SelectionChanged {
        path: "README.md".into(),
        start: 0,
        end: 6,
    })?;

    println!("known kinds: {:?}", bus.known_kinds().iter().map(|k| k.name()).collect::<Vec<_>>());
    bus.log_summary();
    bus.clear();
    Ok(())
}
