//! Process-wide frozen site config.
//!
//! The source is compiled in, parsed and validated on the first `load()`,
//! and shared as an `Arc` afterwards. Nothing hands out `&mut SiteConfig`,
//! so the cached value never changes once stored.

use crate::config::{ConfigError, SiteConfig};
use parking_lot::{Mutex, const_mutex};
use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicUsize, Ordering},
};

/// Site source compiled into the binary.
pub const EMBEDDED_SOURCE: &str = include_str!("site.toml");

/// Global provider over [`EMBEDDED_SOURCE`].
static PROVIDER: ConfigProvider = ConfigProvider::new(EMBEDDED_SOURCE);

/// Load the process-wide site config.
///
/// Every successful call returns the same `Arc`.
#[inline]
pub fn load() -> Result<Arc<SiteConfig>, ConfigError> {
    PROVIDER.load()
}

/// Lazily builds and caches one `SiteConfig` from a static source.
///
/// Two states: unloaded and loaded. The first successful `load()` moves to
/// loaded; there is no way back. A failed load stores nothing.
#[derive(Debug)]
pub struct ConfigProvider {
    source: &'static str,
    config: OnceLock<Arc<SiteConfig>>,
    /// Held only while building; the loaded read path never takes it.
    init: Mutex<()>,
    builds: AtomicUsize,
}

impl ConfigProvider {
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            config: OnceLock::new(),
            init: const_mutex(()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Return the cached config, building it on first use.
    ///
    /// Concurrent first callers wait for one build; the rest see its result.
    /// Hints and warnings are printed once, by the caller that built it.
    pub fn load(&self) -> Result<Arc<SiteConfig>, ConfigError> {
        if let Some(config) = self.config.get() {
            return Ok(Arc::clone(config));
        }

        let _guard = self.init.lock();
        if let Some(config) = self.config.get() {
            return Ok(Arc::clone(config));
        }

        self.builds.fetch_add(1, Ordering::Relaxed);
        let (config, diag) = SiteConfig::from_source(self.source)?;
        diag.print_hints_and_warnings();

        let stored = self.config.get_or_init(|| Arc::new(config));
        Ok(Arc::clone(stored))
    }

    pub fn is_loaded(&self) -> bool {
        self.config.get().is_some()
    }

    /// Number of times the source has been parsed and validated,
    /// failed attempts included.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub const fn source(&self) -> &'static str {
        self.source
    }
}
