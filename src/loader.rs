//! CV Loading
//!
//! Reads the raw document from a [`DataSource`], reports validation
//! diagnostics, and normalizes it into a [`CvDocument`]. The loader never
//! fails: unreadable or structurally unusable data yields
//! [`CvDocument::fallback`].

use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::checksum::Checksum;
use crate::config::{CvConfig, DiagnosticsConfig};
use crate::document::{Basics, CvDocument, PageLayout, Section};
use crate::error::{CvError, Result};
use crate::source::{DataSource, FileSource};
use crate::validator::{is_present, CvValidator, ValidationResult};

/// Build a fully-defaulted document from raw JSON.
///
/// Entries inside sections are passed through as-is. Fails only when
/// `basics` is missing or not an object.
pub fn normalize(raw: &Value) -> Result<CvDocument> {
    let basics = raw
        .get("basics")
        .and_then(Value::as_object)
        .ok_or(CvError::MissingBasics)?;

    let text_or = |key: &str, default: &str| {
        basics
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    let mut normalized_basics = Basics::new(
        text_or("name", CvDocument::UNKNOWN_NAME),
        text_or("label", CvDocument::UNSPECIFIED_LABEL),
    );
    normalized_basics.image = basics.get("image").cloned();
    normalized_basics.email = basics.get("email").cloned();
    normalized_basics.phone = basics.get("phone").cloned();
    normalized_basics.url = basics.get("url").cloned();
    normalized_basics.summary = basics.get("summary").cloned();
    normalized_basics.theme = basics.get("theme").cloned();
    normalized_basics.location = basics.get("location").cloned();
    normalized_basics.profiles = array_or_empty(basics.get("profiles"));
    normalized_basics.beian = basics.get("beian").cloned();
    normalized_basics.about = basics.get("about").cloned();

    let mut document = CvDocument::with_basics(normalized_basics);
    document.analytics_code = raw
        .get("analyticsCode")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    document.page_layout = PageLayout::normalize(raw.get("pageLayout"));
    for section in Section::ALL {
        *document.section_mut(section) = array_or_empty(raw.get(section.key()));
    }
    document.images = raw.get("images").filter(|v| is_present(Some(*v))).cloned();

    Ok(document)
}

fn array_or_empty(value: Option<&Value>) -> Vec<Value> {
    value
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

struct CachedLoad {
    document: Arc<CvDocument>,
    checksum: Checksum,
}

/// Loads a CV once and hands out the memoized document
pub struct CvLoader {
    source: Box<dyn DataSource>,
    validator: CvValidator,
    diagnostics: DiagnosticsConfig,
    cache: Mutex<Option<CachedLoad>>,
}

impl CvLoader {
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            validator: CvValidator::new(),
            diagnostics: DiagnosticsConfig::default(),
            cache: Mutex::new(None),
        }
    }

    /// Loader reading the configured source file
    pub fn from_config(config: &CvConfig) -> Self {
        Self::new(FileSource::new(config.source_path())).with_diagnostics(config.diagnostics.clone())
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The normalized CV.
    ///
    /// The first successful load is memoized and the same `Arc` is returned
    /// until [`clear_cache`](Self::clear_cache). Failed loads return the
    /// fallback document and are retried on the next call.
    pub fn load_cv(&self) -> Arc<CvDocument> {
        if let Some(cached) = self.slot().as_ref() {
            return Arc::clone(&cached.document);
        }

        match self.load_fresh() {
            Ok(loaded) => {
                let mut slot = self.slot();
                // Another caller may have finished first
                let cached = slot.get_or_insert(loaded);
                Arc::clone(&cached.document)
            }
            Err(e) => {
                error!("Failed to load CV data from {}: {}", self.source.describe(), e);
                Arc::new(CvDocument::fallback())
            }
        }
    }

    /// The `basics` section of the loaded CV
    pub fn basics(&self) -> Basics {
        self.load_cv().basics.clone()
    }

    /// Drop the memoized document so the next load re-reads the source
    pub fn clear_cache(&self) {
        if self.slot().take().is_some() {
            debug!("Cleared cached CV data for {}", self.source.describe());
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot().is_some()
    }

    /// Checksum of the source text behind the memoized document
    pub fn loaded_checksum(&self) -> Option<Checksum> {
        self.slot().as_ref().map(|c| c.checksum.clone())
    }

    /// Clear the cache if the source changed since it was loaded.
    ///
    /// Returns `true` when the cache was dropped. Nothing is cached before
    /// the first load, so this is a no-op until then.
    pub fn refresh_if_changed(&self) -> bool {
        let Some(checksum) = self.loaded_checksum() else {
            return false;
        };

        match self.source.read() {
            Ok(text) if checksum.matches(&text) => false,
            Ok(_) => {
                info!("CV source {} changed, reloading", self.source.describe());
                self.clear_cache();
                true
            }
            Err(e) => {
                warn!("Could not re-read {}: {}", self.source.describe(), e);
                false
            }
        }
    }

    fn load_fresh(&self) -> Result<CachedLoad> {
        let text = self.source.read()?;
        let checksum = Checksum::of_text(&text);
        let raw: Value = serde_json::from_str(&text)?;

        let report = self.validator.validate(&raw);
        self.report(&report);

        let document = normalize(&raw)?;
        info!(
            "Loaded CV for {} from {} ({})",
            document.basics.name,
            self.source.describe(),
            checksum.short()
        );

        Ok(CachedLoad {
            document: Arc::new(document),
            checksum,
        })
    }

    fn report(&self, report: &ValidationResult) {
        for e in &report.errors {
            error!(code = e.code, path = %e.path, "CV validation error: {}", e.message);
        }
        if self.diagnostics.warnings_enabled() {
            for w in &report.warnings {
                warn!(code = w.code, path = %w.path, "CV validation warning: {}", w.message);
            }
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<CachedLoad>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
