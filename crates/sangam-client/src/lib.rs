//! # sangam-client
//!
//! View-controller layer of the Sangam client: the process-wide query
//! cache, the per-topic polling scheduler, the feature gate, the UI event
//! bus, and one controller per screen.  A UI shell (desktop, TUI, bindings)
//! drives controllers and renders from the cache; it never talks to the API
//! directly.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod events;
pub mod gate;
pub mod poller;
pub mod state;

pub use cache::{QueryCache, QueryKey};
pub use config::ClientConfig;
pub use events::{EventBus, UiEvent};
pub use gate::GateController;
pub use poller::{spawn_poll, PollErrorPolicy, PollHandle};
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise tracing for the client process.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("sangam_client=debug,sangam_api=debug,sangam_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
