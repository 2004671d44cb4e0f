//! # Scheduled Dispatch Example
//!
//! Publishes events in scheduled mode: listeners run on tokio workers and the
//! publisher continues immediately. Failures of scheduled listeners never reach
//! the publisher; they are reported to the bus logger instead.
//!
//! ## Run
//! ```bash
//! cargo run --example scheduled
//! ```

use std::time::Duration;

use eventvisor::{Bus, Event, Listener, ListenerError, PublishOptions};

#[derive(Debug, Clone)]
struct DocumentSaved {
    path: String,
}

impl Event for DocumentSaved {
    const KIND: &'static str = "document.saved";
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eventvisor=info")),
        )
        .init();

    let bus = Bus::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    bus.subscribe(&Listener::named("indexer", move |ev: &DocumentSaved| {
        let _ = tx.send(format!("indexed {}", ev.path));
        Ok(())
    }))?;
    bus.subscribe(&Listener::named("backup", |ev: &DocumentSaved| {
        Err(ListenerError::fail(format!("backup of {} failed", ev.path)))
    }))?;

    for path in ["a.md", "b.md", "c.md"] {
        bus.publish(DocumentSaved { path: path.into() }, PublishOptions::scheduled())?;
        println!("published {path} (publisher did not wait)");
    }

    for _ in 0..3 {
        match tokio::time::timeout(Duration::from_secs(1), rx.recv()).await {
            Ok(Some(msg)) => println!("listener: {msg}"),
            _ => break,
        }
    }

    // Give the failing backups a moment to reach the logger.
    tokio::time::sleep(Duration::from_millis(50)).await;

    if let Some(rec) = bus.perf::<DocumentSaved>() {
        println!("scheduled passes: {} (errors are not counted: {})", rec.count, rec.error_count);
    }
    Ok(())
}
