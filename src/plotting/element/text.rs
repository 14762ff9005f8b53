//! Text helpers shared by the SVG writers.

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("KRAS <mut> & \"wt\""), "KRAS &lt;mut&gt; &amp; &quot;wt&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
