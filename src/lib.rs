//! CV Data
//!
//! Loads a résumé/CV from a single JSON file, checks it against the expected
//! shape, and normalizes it into a fully-defaulted document for page
//! templates.
//!
//! ## Features
//!
//! - **Diagnostics, not failures**: validation collects errors and warnings
//!   with stable codes and field paths
//! - **Normalization**: defaults for every optional section, legacy layout
//!   spellings mapped to `single` / `two`
//! - **Always renderable**: unreadable or unusable data yields a fixed
//!   fallback document
//! - **Load once**: the loader memoizes the first successful load and can
//!   reload when the source file changes
//!
//! ## Pipeline
//!
//! ```text
//! DataSource ──read──▶ raw JSON ──▶ CvValidator ──▶ tracing (errors / warnings)
//!                         │
//!                         └──────▶ normalize ──▶ Arc<CvDocument> (memoized)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use cv_data::{CvConfig, CvLoader};
//!
//! let config = CvConfig::load()?;
//! let loader = CvLoader::from_config(&config);
//! let cv = loader.load_cv();
//! println!("{} ({})", cv.basics.name, cv.page_layout);
//! # Ok::<(), cv_data::CvError>(())
//! ```

pub mod checksum;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod source;
pub mod validator;

pub use checksum::Checksum;
pub use config::{BuildEnv, CvConfig, DiagnosticsConfig};
pub use document::{Basics, CvDocument, PageLayout, Section, SectionRecord};
pub use error::{CvError, Result};
pub use loader::{normalize, CvLoader};
pub use source::{DataSource, FileSource, StaticSource};
pub use validator::{validate_cv, CvValidator, Diagnostic, ValidationResult};
