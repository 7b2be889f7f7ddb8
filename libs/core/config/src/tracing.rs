use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre with the project-standard report layout.
///
/// Call this first in `main()`. Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Default filter directives when `RUST_LOG` is not set.
fn default_filter(environment: &Environment) -> EnvFilter {
    if environment.is_production() {
        EnvFilter::new("info,sea_orm=warn,sqlx=warn")
    } else {
        EnvFilter::new("debug,sqlx=info,hyper=info,tower_http=debug")
    }
}

/// Initialize tracing for the given environment.
///
/// - **Production** (`APP_ENV=production`): flattened JSON events, no targets.
/// - **Development** (default): pretty, human-readable output.
///
/// Both install `tracing_error::ErrorLayer` so eyre reports carry span traces.
/// `RUST_LOG` overrides the default directives. Repeated calls are no-ops,
/// which keeps test binaries that share a process happy.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(environment));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
