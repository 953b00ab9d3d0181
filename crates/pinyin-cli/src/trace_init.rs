use std::sync::Once;

static INIT: Once = Once::new();

/// Log to stderr. `RUST_LOG` overrides the default `info` level
/// (e.g. `RUST_LOG=pinyin_core=debug` for per-stage counts).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    });
}
