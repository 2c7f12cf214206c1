//! Log output for the `nf` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `NF_LOG` is set, e.g. `NF_LOG=nf_eval=debug`.
///
/// `NF_LOG_TREE` switches to indented span trees. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("NF_LOG") else {
            return;
        };
        let registry = tracing_subscriber::registry().with(EnvFilter::new(directives));
        if std::env::var_os("NF_LOG_TREE").is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    });
}
