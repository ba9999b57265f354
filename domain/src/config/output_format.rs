//! Output format value object

use serde::{Deserialize, Serialize};

/// How a ratings review is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every question with each reviewer's rating (default)
    #[default]
    Full,
    /// Totals per reviewer only
    Summary,
    /// JSON output
    Json,
}
