use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{BulletId, Outline};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // RUST_LOG wins, otherwise debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Build an outline from an indented sketch, two spaces per level.
///
/// ```text
/// a
///   b
///     d
///   c
/// e
/// ```
///
/// A trailing `-` on a line collapses that bullet. Returns the outline and the
/// ids in line order. Panics on malformed input; meant for tests only.
pub fn outline_from_sketch(sketch: &str) -> (Outline, Vec<BulletId>) {
    let mut outline = Outline::new();
    let mut ids: Vec<BulletId> = Vec::new();
    let mut collapsed: Vec<BulletId> = Vec::new();
    // open ancestors, index = level
    let mut path: Vec<BulletId> = Vec::new();

    for line in sketch.lines().filter(|l| !l.trim().is_empty()) {
        let indent = line.len() - line.trim_start().len();
        assert!(indent % 2 == 0, "odd indentation in sketch line {line:?}");
        let level = indent / 2;
        assert!(level <= path.len(), "sketch line skips a level: {line:?}");
        path.truncate(level);

        let text = line.trim();
        let (next, id) = outline
            .try_append_child(path.last().copied())
            .expect("sketch parent exists");
        outline = match text.strip_suffix('-') {
            Some(rest) => {
                collapsed.push(id);
                next.update_content(id, rest.trim_end())
            }
            None => next.update_content(id, text),
        };
        ids.push(id);
        path.push(id);
    }

    // appending a child expands the parent, so collapse last
    for id in collapsed {
        outline = outline.toggle_expanded(id);
    }
    (outline, ids)
}
