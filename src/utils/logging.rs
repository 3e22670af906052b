use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use std::time::Instant;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. Output goes to stderr so that
    /// configuration JSON on stdout stays parseable.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pagepack=info"));

        // A subscriber may already be installed (tests, embedding hosts)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn assembling(mode: &str, root: &str) {
        info!("🔧 Assembling {} configuration", mode);
        info!("📁 Root: {}", root);
    }

    pub fn pages_found(count: usize, dir: &str) {
        info!("📄 Found {} page template(s) in {}", count, dir);
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
