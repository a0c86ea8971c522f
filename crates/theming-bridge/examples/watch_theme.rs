//! Theme Watch Example
//!
//! Watches the system theme and high contrast state and prints every event
//! the application runtime would receive. Switch between light and dark
//! mode while it runs.
//!
//! Run with: cargo run -p theming-bridge --example watch_theme

use std::sync::Arc;
use std::time::Duration;

use theming_bridge::{ChannelEndpoint, EndpointHandle, ThemeStateRelay, ThemeWatcher, ThemingModule};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let watcher = ThemeWatcher::new()?;
    let (endpoint, calls) = ChannelEndpoint::new();
    let relay = Arc::new(ThemeStateRelay::new(
        watcher.events(),
        EndpointHandle::new(&endpoint),
    ));
    let module = ThemingModule::new(relay.clone());

    watcher.start()?;
    println!("Watching for 30 seconds...");

    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while let Some(remaining) = deadline.checked_duration_since(std::time::Instant::now()) {
        let Ok(call) = calls.recv_timeout(remaining) else {
            break;
        };
        println!(
            "{}.{}({})",
            call.module,
            call.method,
            serde_json::to_string(&call.args)?
        );
        println!(
            "  {} = {}",
            module.name(),
            serde_json::to_string(&module.constants())?
        );
    }

    watcher.stop();
    Ok(())
}
