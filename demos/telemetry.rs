//! # Telemetry Example
//!
//! Simulates a render loop publishing frame ticks to a few listeners of
//! different cost, then prints the per-kind statistics the bus collected.
//!
//! ## Run
//! ```bash
//! cargo run --example telemetry
//! ```

use std::time::Duration;

use eventvisor::{Bus, Event, Listener, ListenerError, PublishOptions};

#[derive(Debug, Clone, Copy)]
struct FrameTick {
    frame: u64,
}

impl Event for FrameTick {
    const KIND: &'static str = "frame.tick";
}

#[derive(Debug, Clone, Copy)]
struct ViewportResized {
    width: u32,
    height: u32,
}

impl Event for ViewportResized {
    const KIND: &'static str = "viewport.resized";
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eventvisor=info")),
        )
        .init();

    let bus = Bus::new();

    bus.subscribe(&Listener::named("animator", |_: &FrameTick| Ok(())))?;
    bus.subscribe(&Listener::named("physics", |ev: &FrameTick| {
        if ev.frame % 30 == 0 {
            std::thread::sleep(Duration::from_millis(2));
        }
        Ok(())
    }))?;
    bus.subscribe(&Listener::named("fps-overlay", |ev: &FrameTick| {
        if ev.frame % 50 == 49 {
            return Err(ListenerError::fail(format!("overlay missed frame {}", ev.frame)));
        }
        Ok(())
    }))?;
    bus.subscribe_fn(|ev: &ViewportResized| {
        println!("viewport: {}x{}", ev.width, ev.height);
        Ok(())
    })?;

    for frame in 0..120 {
        bus.publish(FrameTick { frame }, PublishOptions::new().continue_on_error())?;
        if frame == 60 {
            bus.emit(ViewportResized {
                width: 1280,
                height: 720,
            })?;
        }
    }

    println!();
    println!("Telemetry:");
    for (kind, rec) in bus.telemetry().summary() {
        println!(" ├─► {kind}");
        println!(" │    ├─► passes:       {}", rec.count);
        println!(" │    ├─► avg / min / max: {:?} / {:?} / {:?}", rec.average, rec.min, rec.max);
        println!(" │    ├─► last listeners: {}", rec.listener_count);
        println!(" │    └─► total errors:   {}", rec.total_errors);
    }

    bus.log_summary();
    Ok(())
}
