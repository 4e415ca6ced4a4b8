//! # Cutlayout
//!
//! Manual adjustment of optimized panel cut layouts. The optimizer places
//! rectangular pieces on stock sheets; this workspace lets a user drag those
//! pieces around afterwards while keeping the layout valid.
//!
//! ## Architecture
//!
//! Cutlayout is organized as a workspace with multiple crates:
//!
//! 1. **cutlayout-core** - Layout types, JSON payload, piece lookup, errors
//! 2. **cutlayout-editor** - Collision resolution, drag state machine, waste,
//!    edit-session lifecycle, persistence gateways, view model
//! 3. **cutlayout-settings** - Editor configuration files
//! 4. **cutlayout** - Headless binary that replays drags against a layout file

pub mod cli;

pub use cutlayout_core::{
    EditError, Layout, LayoutError, LayoutPayload, PieceLookup, Placement, Point, Rect, Sheet,
    Stock,
};
pub use cutlayout_editor::{
    DragOptions, DropOutcome, EditorError, FileGateway, LayoutEditor, LayoutView,
    MemoryGateway, PersistenceGateway, PointerEvent, ViewOptions,
};
pub use cutlayout_settings::EditorConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Drag tuning taken from the editor configuration.
pub fn drag_options(config: &EditorConfig) -> DragOptions {
    DragOptions {
        max_push_passes: config.drag.max_push_passes,
        snap_to_whole_units: config.drag.snap_to_whole_units,
    }
}

/// Display settings taken from the editor configuration.
pub fn view_options(config: &EditorConfig) -> ViewOptions {
    ViewOptions {
        heading_template: config.display.heading_template.clone(),
        summary_template: config.display.summary_template.clone(),
        decimals: config.display.decimals,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so reports on stdout stay clean
/// - RUST_LOG environment variable support
/// - JSON lines instead of text when `CUTLAYOUT_LOG_FORMAT=json`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let json = std::env::var("CUTLAYOUT_LOG_FORMAT").is_ok_and(|v| v == "json");

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
