/// Normalizes caller-supplied paging into (page, per_page, offset). Values
/// are untrusted query parameters, so the offset math saturates instead of
/// overflowing.
pub fn page_bounds(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    let offset = page.saturating_sub(1).saturating_mul(per_page);
    (page, per_page, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(page_bounds(None, None), (1, 20, 0));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(page_bounds(Some(0), Some(0)), (1, 1, 0));
        assert_eq!(page_bounds(Some(-5), Some(10_000)), (1, 100, 0));
    }

    #[test]
    fn huge_page_numbers_do_not_overflow_the_offset() {
        let (page, per_page, offset) = page_bounds(Some(i64::MAX), Some(100));
        assert_eq!(page, i64::MAX);
        assert_eq!(per_page, 100);
        assert_eq!(offset, i64::MAX);

        let (_, _, offset) = page_bounds(Some(i64::MAX - 1), Some(50));
        assert!(offset >= 0);
    }
}
