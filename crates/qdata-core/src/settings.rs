//! Process-wide numerical settings

use std::sync::{OnceLock, RwLock};

/// Default absolute tolerance below which a value counts as zero.
pub const DEFAULT_ATOL: f64 = 1e-12;
/// Default nnz above which kernels switch to the parallel path.
pub const DEFAULT_PARALLEL_NNZ: usize = 32 * 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub atol: f64,
    pub parallel_nnz_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            atol: DEFAULT_ATOL,
            parallel_nnz_threshold: DEFAULT_PARALLEL_NNZ,
        }
    }
}

impl Settings {
    /// Defaults overridden by `QDATA_ATOL` and `QDATA_PARALLEL_NNZ`.
    /// Unparseable or negative values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut out = Self::default();
        if let Ok(raw) = std::env::var("QDATA_ATOL") {
            match raw.trim().parse::<f64>() {
                Ok(v) if v >= 0.0 && v.is_finite() => out.atol = v,
                _ => log::warn!("ignoring invalid QDATA_ATOL={raw:?}"),
            }
        }
        if let Ok(raw) = std::env::var("QDATA_PARALLEL_NNZ") {
            match raw.trim().parse::<usize>() {
                Ok(v) => out.parallel_nnz_threshold = v,
                Err(_) => log::warn!("ignoring invalid QDATA_PARALLEL_NNZ={raw:?}"),
            }
        }
        out
    }
}

fn global() -> &'static RwLock<Settings> {
    static GLOBAL: OnceLock<RwLock<Settings>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(Settings::from_env()))
}

/// Current process-wide settings.
#[must_use]
pub fn settings() -> Settings {
    match global().read() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

pub fn set_settings(new: Settings) {
    log::debug!("updating settings: {new:?}");
    match global().write() {
        Ok(mut guard) => *guard = new,
        Err(poisoned) => *poisoned.into_inner() = new,
    }
}
