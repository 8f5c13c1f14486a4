//! Style aggregation.
//!
//! Raw style sections are joined in registry order. No scoping and no
//! deduplication: once injected, every rule is global.

use crate::registry::Registry;

/// Join every non-empty style section with a single newline.
pub fn aggregate_styles(registry: &Registry) -> String {
    registry
        .iter()
        .map(|d| d.style_text.as_str())
        .filter(|style| !style.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
