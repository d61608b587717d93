//! Text helpers shared by the suggestion engine.

/// Lowercases and collapses separators (`_ - . / \` and runs of whitespace)
/// into single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized form with all spaces removed, so `region_name`, `Region Name`
/// and `regionName` compare equal.
pub(crate) fn compact_key(raw: &str) -> String {
    normalize_text(raw).replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_collapse_to_single_spaces() {
        assert_eq!(normalize_text("  Region__Name "), "region name");
        assert_eq!(normalize_text("stain.id/raw"), "stain id raw");
    }

    #[test]
    fn compact_key_ignores_spacing_and_case() {
        assert_eq!(compact_key("region_name"), compact_key("RegionName"));
        assert_eq!(compact_key("file name"), "filename");
    }
}
