use crate::format::DEFAULT_LOCALE;
use crate::models::GroupingMode;
use serde::{Deserialize, Serialize};

/// Settings of one report pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Top-level grouping dimension.
    pub mode: GroupingMode,
    /// Locale tag for number grouping (see [`crate::format::map_locale`]).
    pub locale: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mode: GroupingMode::Property,
            locale: DEFAULT_LOCALE.into(),
        }
    }
}

impl ReportConfig {
    pub fn new(mode: GroupingMode, locale: impl Into<String>) -> Self {
        Self {
            mode,
            locale: locale.into(),
        }
    }
}
