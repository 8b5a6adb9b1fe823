//! # VfxTint
//!
//! A pure-Rust library for recoloring VFX color parameters in Unreal assets
//! exported to JSON by UAssetAPI.
//!
//! ## Supported Export Shapes
//!
//! - **Material instances** - `VectorParameterValues`, classified by a keyword dictionary
//! - **Data tables** - `RichTextStyleRow` rows (`ColorAndOpacity`, `SpecifiedColor`, ...)
//! - **Generic exports** - any `Exports[].Data` tree, e.g. widget blueprints
//!
//! ## Quick Start
//!
//! ### Recoloring a Folder
//!
//! ```no_run
//! use vfxtint::io::collect_json_files;
//! use vfxtint::session::Session;
//!
//! let mut session = Session::new();
//! let report = session.load(collect_json_files("Exports/")?);
//! println!("Found {} color parameters", report.parameters_added);
//!
//! // Select everything and tint it blue, keeping each color's brightness
//! let ids: Vec<String> = session.parameters().iter().map(|p| p.id.clone()).collect();
//! session.selection_mut().select_only(ids);
//! session.set_master_color("#0000ff")?;
//! session.apply_master_color()?;
//!
//! // Writes Exports/output/...
//! session.save_to(std::path::Path::new("Exports/"))?;
//! # Ok::<(), vfxtint::Error>(())
//! ```
//!
//! ### Extracting From One Document
//!
//! ```
//! use serde_json::json;
//! use vfxtint::dictionary::KeywordDictionary;
//! use vfxtint::formats::extract;
//!
//! let document = json!({"Exports": [{"ObjectName": "Widget", "Data": [{
//!     "Name": "ColorAndOpacity",
//!     "StructType": "LinearColor",
//!     "Value": [{"Value": {"R": 2.0, "G": 0.5, "B": 0.5, "A": 1.0}}]
//! }]}]});
//!
//! let dictionary = KeywordDictionary::bundled()?;
//! let params = extract(&document, "W_Hud.json", "ui/W_Hud.json", Some(&dictionary));
//! assert_eq!(params.len(), 1);
//! assert_eq!(params[0].param_name, "Widget - ColorAndOpacity");
//! # Ok::<(), vfxtint::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `vfxtint` command-line binary

pub mod color;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod formats;
pub mod io;
pub mod project;
pub mod session;
pub mod transform;
pub mod writeback;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::color::{Channel, LinearColor, Rgb, hex_to_rgb, parse_hex, rgba_to_display_hex};
    pub use crate::config::Preferences;
    pub use crate::dictionary::KeywordDictionary;
    pub use crate::formats::{AssetFormat, ColorParameter, ParamPath, PathSegment, extract};
    pub use crate::io::{SourceFile, collect_json_files, write_files};
    pub use crate::project::SessionEntry;
    pub use crate::session::{
        ClickMode, History, LoadReport, SaveReport, SelectionSet, Session, Snapshot, SortOrder,
        ViewFilter,
    };
    pub use crate::transform::{GrayscaleGuard, TransformOptions};
    pub use crate::writeback::FilePayload;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
