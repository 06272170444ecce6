//! Test support: once-only tracing subscriber, isolated config environment.

use std::env;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Install a global subscriber for tests. Honours `RUST_LOG`, defaulting to `debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
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

/// Variables read by config loading.
pub const CONFIG_VARS: [&str; 6] = [
    "XDG_CONFIG_HOME",
    "ARBOR_CONFIG",
    "ARBOR_INDENT",
    "ARBOR_SIZE_UNIT",
    "ARBOR_PRECISION",
    "ARBOR_TREE_STYLE",
];

/// Exclusive access to the process environment for config tests.
///
/// Points `XDG_CONFIG_HOME` at `config_home` with no `ARBOR_*` overrides.
/// Everything in [`CONFIG_VARS`] is removed again on drop.
pub struct ConfigEnv {
    _lock: MutexGuard<'static, ()>,
}

impl ConfigEnv {
    pub fn new(config_home: &Path) -> Self {
        // A panicking test only poisons the lock; the env is reset below anyway
        let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_config_vars();
        env::set_var("XDG_CONFIG_HOME", config_home);
        Self { _lock: lock }
    }

    pub fn set(&self, key: &str, value: &str) {
        env::set_var(key, value);
    }
}

impl Drop for ConfigEnv {
    fn drop(&mut self) {
        clear_config_vars();
    }
}

fn clear_config_vars() {
    for key in CONFIG_VARS {
        env::remove_var(key);
    }
}
