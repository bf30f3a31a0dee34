//! aptmix
//!
//! A small Rust library for rolling up apartment-mix sales data of a primary residential
//! property and its competitors. Pairs with the `aptmix` CLI.
//!
//! ### Features
//! - Rollups by property or by unit-type with count, share, total area and
//!   min/avg/max of area, cost and price per area
//! - Canonical ordering of unit-type labels with fuzzy fallback matching
//! - Per-bucket [0, 1] intensities for colour-coding table cells
//! - Detection and cost statistics of comparable (same unit-type) groups
//! - Side-by-side characteristics summary of all properties
//! - CSV/JSON export of the rendered table
//!
//! ### Example
//! ```no_run
//! use aptmix::{GroupingMode, ReportConfig};
//!
//! let resp = aptmix::storage::load_response("response.json")?;
//! let tree = aptmix::stats::aggregate(&resp.groups, GroupingMode::Type);
//! let report = aptmix::report::build_report(&tree, "ru");
//! aptmix::storage::save_csv(&report, "mix_by_type.csv")?;
//! if aptmix::compare::has_comparable_groups(&resp.groups) {
//!     println!("{:#?}", aptmix::compare::compare_pairs(&resp.groups));
//! }
//! # let _ = ReportConfig::default();
//! # Ok::<(), aptmix::Error>(())
//! ```

pub mod characteristics;
pub mod compare;
pub mod config;
pub mod error;
pub mod format;
pub mod intensity;
pub mod models;
pub mod order;
pub mod report;
pub mod stats;
pub mod storage;

pub use config::ReportConfig;
pub use error::{Error, Result};
pub use models::{CharacteristicsRow, GroupRecord, GroupingMode, UploadResponse};
