//! Pagination control rendered under list views.

use serde::Serialize;

use crate::controller::list::list_route;
use crate::domain::collection::CollectionConfig;
use crate::domain::page::Page;
use crate::domain::types::PageIndex;

/// Page numbers to show around `current_page`, with `None` marking a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// Previous/next affordances follow the server's `has_previous`/`has_next`
/// flags only; a disabled affordance carries no link.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaginationControl {
    pub page: usize,
    pub total_pages: Option<usize>,
    /// Numbered links, `None` marking a gap.
    pub pages: Vec<Option<PageLink>>,
    pub previous: Option<String>,
    pub next: Option<String>,
    /// Whether there is more than one page to move between.
    pub visible: bool,
}

impl PaginationControl {
    /// Builds the control for `page`. `search` is appended to every link so
    /// page changes keep the current filter.
    pub fn new<T>(config: &CollectionConfig, page: &Page<T>, search: Option<&str>) -> Self {
        let current = page.page.get();
        let query = search
            .filter(|s| !s.is_empty())
            .and_then(|q| serde_html_form::to_string([("q", q)]).ok());
        let href = |number: usize| {
            let route = list_route(config, PageIndex::from_route_token(number - 1));
            match &query {
                Some(query) => format!("{route}?{query}"),
                None => route,
            }
        };

        let pages = get_pages(page.total_pages.unwrap_or(0), current, 2, 2, 4, 2)
            .into_iter()
            .map(|slot| {
                slot.map(|number| PageLink {
                    number,
                    href: href(number),
                    current: number == current,
                })
            })
            .collect();

        let previous = page
            .has_previous
            .then(|| href(current.saturating_sub(1).max(1)));
        let next = page.has_next.then(|| href(current.saturating_add(1)));

        Self {
            page: current,
            total_pages: page.total_pages,
            pages,
            visible: page.total_pages.unwrap_or(0) > 1 || previous.is_some() || next.is_some(),
            previous,
            next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collection::Collection;
    use crate::domain::types::PageSize;

    fn page(current: usize, total: usize, has_previous: bool, has_next: bool) -> Page<()> {
        Page {
            items: Vec::new(),
            page: PageIndex::new(current).expect("valid page"),
            page_size: PageSize::default(),
            has_previous,
            has_next,
            total_pages: Some(total),
            total_items: None,
        }
    }

    #[test]
    fn windows_with_gaps() {
        assert_eq!(
            get_pages(20, 10, 2, 2, 4, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn links_use_zero_based_route_tokens() {
        let control =
            PaginationControl::new(Collection::Cores.config(), &page(2, 3, true, true), None);

        assert_eq!(control.previous.as_deref(), Some("/cores/page/0"));
        assert_eq!(control.next.as_deref(), Some("/cores/page/2"));
        let current: Vec<_> = control.pages.iter().flatten().filter(|l| l.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].href, "/cores/page/1");
    }

    #[test]
    fn next_is_disabled_when_server_says_no_next() {
        let control =
            PaginationControl::new(Collection::Ships.config(), &page(2, 5, true, false), None);

        assert_eq!(control.next, None);
        assert!(control.previous.is_some());
    }

    #[test]
    fn links_carry_search_text() {
        let control = PaginationControl::new(
            Collection::Payloads.config(),
            &page(1, 2, false, true),
            Some("Crew Dragon&1"),
        );

        assert_eq!(control.previous, None);
        assert_eq!(
            control.next.as_deref(),
            Some("/payloads/page/1?q=Crew+Dragon%261")
        );
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let mut huge = page(1, 3, true, true);
        huge.page = PageIndex::from_route_token(usize::MAX - 1);

        let control = PaginationControl::new(Collection::Cores.config(), &huge, None);

        assert_eq!(control.page, usize::MAX);
        assert!(control.next.is_some());
        assert_eq!(control.pages.iter().flatten().count(), 3);
    }

    #[test]
    fn single_page_control_is_hidden() {
        let control =
            PaginationControl::new(Collection::Rockets.config(), &page(1, 1, false, false), None);

        assert!(!control.visible);
    }
}
