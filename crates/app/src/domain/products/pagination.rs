//! Pagination arithmetic for the product listing.

use std::num::NonZeroU32;

/// Row window and page total derived from a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub total_pages: u64,
}

/// Computes the row offset of `page` and how many pages `total_count` rows span.
///
/// No clamping is applied: a page past the end yields an offset past the last
/// row, which the listing query answers with an empty result.
#[must_use]
pub fn page_window(page: NonZeroU32, page_size: NonZeroU32, total_count: u64) -> PageWindow {
    let page_size = u64::from(page_size.get());

    PageWindow {
        offset: (u64::from(page.get()) - 1) * page_size,
        total_pages: total_count.div_ceil(page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
    }

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_window(nz(1), nz(10), 25).offset, 0);
    }

    #[test]
    fn offset_advances_by_page_size() {
        assert_eq!(page_window(nz(3), nz(10), 25).offset, 20);
        assert_eq!(page_window(nz(4), nz(7), 0).offset, 21);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page_window(nz(1), nz(10), 25).total_pages, 3);
        assert_eq!(page_window(nz(1), nz(10), 30).total_pages, 3);
        assert_eq!(page_window(nz(1), nz(10), 31).total_pages, 4);
        assert_eq!(page_window(nz(1), nz(1), 1).total_pages, 1);
    }

    #[test]
    fn empty_table_has_no_pages() {
        assert_eq!(page_window(nz(1), nz(10), 0).total_pages, 0);
    }

    #[test]
    fn total_pages_matches_integer_ceiling_formula() {
        for page_size in 1..=12_u32 {
            for total in 0..=50_u64 {
                let size = u64::from(page_size);

                assert_eq!(
                    page_window(nz(1), nz(page_size), total).total_pages,
                    (total + size - 1) / size,
                    "total={total} page_size={page_size}"
                );
            }
        }
    }
}
