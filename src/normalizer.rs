use crate::utils::collapse_whitespace;

/// Collapsed, trimmed and upper-cased form used for substring matching.
pub fn normalize_text(text: &str) -> String {
    collapse_whitespace(text).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_spacing() {
        assert_eq!(normalize_text("  iphone   xs\tmax "), "IPHONE XS MAX");
    }
}
