//! Windowed page-link strip for the pagination control.

/// Pages always shown at the left edge of the strip.
const LEFT_EDGE: usize = 1;
/// Pages shown on each side of the current page.
const AROUND_CURRENT: usize = 2;
/// Pages always shown at the right edge of the strip.
const RIGHT_EDGE: usize = 1;

/// Computes the page numbers to render, with `None` marking an ellipsis gap,
/// e.g. `1 … 4 5 [6] 7 8 … 12`.
///
/// Returns an empty strip when there is at most one page: single-page lists
/// render no pagination control at all.
pub fn page_links(current: usize, total_pages: usize) -> Vec<Option<usize>> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let mut links = Vec::new();

    let left_end = (1 + LEFT_EDGE).min(total_pages + 1);
    links.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current.saturating_sub(AROUND_CURRENT));
    let mid_end = (current + AROUND_CURRENT + 1).min(total_pages + 1);
    if mid_start > left_end {
        links.push(None);
    }
    links.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(RIGHT_EDGE) + 1);
    if right_start > mid_end {
        links.push(None);
    }
    links.extend((right_start..=total_pages).map(Some));

    links
}

#[cfg(test)]
mod tests {
    use super::page_links;

    #[test]
    fn single_page_renders_no_control() {
        assert!(page_links(1, 0).is_empty());
        assert!(page_links(1, 1).is_empty());
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(
            page_links(2, 4),
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn middle_of_long_range_gaps_both_sides() {
        let links = page_links(6, 12);
        assert_eq!(
            links,
            vec![
                Some(1),
                None,
                Some(4),
                Some(5),
                Some(6),
                Some(7),
                Some(8),
                None,
                Some(12),
            ]
        );
    }

    #[test]
    fn edges_do_not_produce_gaps() {
        let links = page_links(1, 12);
        assert_eq!(links.first(), Some(&Some(1)));
        // No gap between the left edge and the window around page 1.
        assert_ne!(links[1], None);

        let links = page_links(12, 12);
        assert_eq!(links.last(), Some(&Some(12)));
        assert_ne!(links[links.len() - 2], None);
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_links(99, 3), page_links(3, 3));
    }
}
