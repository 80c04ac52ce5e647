// Pagination for the payment history list

pub const PAYMENTS_PER_PAGE: u64 = 10;
const MAX_VISIBLE_LINKS: u32 = 5;

pub fn total_pages(count: u64) -> u32 {
    count.div_ceil(PAYMENTS_PER_PAGE) as u32
}

/// Page numbers to show as links: at most five, sliding with `current`.
pub fn visible_pages(current: u32, total: u32) -> Vec<u32> {
    let shown = total.min(MAX_VISIBLE_LINKS);
    let first = if total <= MAX_VISIBLE_LINKS || current <= 3 {
        1
    } else if current >= total - 2 {
        total - 4
    } else {
        current - 2
    };
    (first..first + shown).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLinks {
    pub current: u32,
    pub total: u32,
    pub prev: u32,
    pub next: u32,
    pub pages: Vec<u32>,
}

impl PageLinks {
    pub fn new(current: u32, count: u64) -> Self {
        let total = total_pages(count);
        Self {
            current,
            total,
            prev: current.saturating_sub(1).max(1),
            next: current.saturating_add(1).min(total),
            pages: visible_pages(current, total),
        }
    }

    /// Controls are hidden when everything fits on one page.
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }

    pub fn at_first(&self) -> bool {
        self.current == 1
    }

    pub fn at_last(&self) -> bool {
        self.current == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        for (count, expected) in [(0, 0), (1, 1), (10, 1), (11, 2), (95, 10), (100, 10)] {
            assert_eq!(total_pages(count), expected, "count={}", count);
        }
    }

    #[test]
    fn window_covers_all_pages_when_few() {
        assert_eq!(visible_pages(1, 3), vec![1, 2, 3]);
        assert_eq!(visible_pages(3, 5), vec![1, 2, 3, 4, 5]);
        assert!(visible_pages(1, 0).is_empty());
    }

    #[test]
    fn window_slides_with_current_page() {
        assert_eq!(visible_pages(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(4, 10), vec![2, 3, 4, 5, 6]);
        assert_eq!(visible_pages(7, 10), vec![5, 6, 7, 8, 9]);
        assert_eq!(visible_pages(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(4, 6), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn prev_and_next_are_clamped() {
        let first = PageLinks::new(1, 35);
        assert_eq!((first.prev, first.next, first.total), (1, 2, 4));
        assert!(first.at_first());

        let last = PageLinks::new(4, 35);
        assert_eq!((last.prev, last.next), (3, 4));
        assert!(last.at_last());
    }

    #[test]
    fn largest_page_number_does_not_overflow() {
        let links = PageLinks::new(u32::MAX, 95);
        assert_eq!(links.total, 10);
        assert_eq!(links.next, 10);
        assert_eq!(links.prev, u32::MAX - 1);
        assert_eq!(links.pages, vec![6, 7, 8, 9, 10]);
        assert!(!links.at_first());
    }

    #[test]
    fn single_page_hides_controls() {
        assert!(!PageLinks::new(1, 10).is_visible());
        assert!(PageLinks::new(1, 11).is_visible());
    }
}
