//! Count formatting for log and report lines.

/// `"s"` unless `n` is exactly one.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `"1 page"`, `"3 pages"`, `"0 issues"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "issue"), "0 issues");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(12, "article"), "12 articles");
    }
}
