//! Client-side query engine for the connections table.
//!
//! Everything here is a pure function of (records, [`QueryState`]): the page
//! controller owns the state and re-runs [`run_query`] on every render. The
//! pipeline is always filter, then sort, then paginate, so page counts follow
//! the active search.

use std::num::NonZeroUsize;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::integrations::model::common::Connection;

/// Direction of sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Columns the connections table can be sorted by.
/// `id` and `icon` are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SortKey {
    Integration,
    Name,
    Source,
    Entity,
    Interval,
}

impl SortKey {
    /// The field this key sorts on
    pub fn value(self, connection: &Connection) -> &str {
        match self {
            SortKey::Integration => &connection.integration,
            SortKey::Name => &connection.name,
            SortKey::Source => &connection.source,
            SortKey::Entity => &connection.entity,
            SortKey::Interval => &connection.interval,
        }
    }

    /// Key that sorts on this column; highlighted in the header
    pub fn hotkey(self) -> char {
        match self {
            SortKey::Integration => 'i',
            SortKey::Name => 'n',
            SortKey::Source => 's',
            SortKey::Entity => 'e',
            SortKey::Interval => 't',
        }
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        SortKey::iter().find(|k| k.hotkey() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Interactive inputs of the query. Ephemeral: rebuilt whenever the page is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_term: String,
    pub sort: Option<SortSpec>,
    current_page: usize,
    page_size: NonZeroUsize,
}

impl QueryState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            current_page: 1,
            page_size,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// A new search always starts on page 1
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.current_page = 1;
    }

    #[cfg(test)]
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Same key flips the direction, a different key starts ascending
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.flip(),
            },
            _ => SortSpec {
                key,
                direction: SortDirection::Ascending,
            },
        });
    }

    /// Jump to `page`, clamped into `[1, max(1, total_pages)]`
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Pull the current page back into range after the record set changed
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.set_page(self.current_page, total_pages);
    }
}

/// One rendered page of the query result
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a Connection>,
    pub page: usize,
    pub total_pages: usize,
    /// Number of records left after filtering
    pub total_matches: usize,
}

/// Case-insensitive substring match on `name` or `integration`.
/// The term is trimmed first, so `" kafka "` matches like `"kafka"` and a
/// whitespace-only term matches everything. Relative order is preserved.
pub fn filter<'a>(records: &'a [Connection], search_term: &str) -> Vec<&'a Connection> {
    let needle = search_term.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|conn| {
            let matches_name = conn.name.to_lowercase().contains(&needle);
            let matches_integration = conn.integration.to_lowercase().contains(&needle);
            matches_name || matches_integration
        })
        .collect()
}

/// Stable, case-insensitive sort. `None` leaves the order untouched.
pub fn sort(matches: &mut [&Connection], sort: Option<SortSpec>) {
    let Some(SortSpec { key, direction }) = sort else {
        return;
    };
    // slice::sort_by is stable, so equal values keep their filtered order in both directions
    matches.sort_by(|a, b| {
        let ord = key
            .value(a)
            .to_lowercase()
            .cmp(&key.value(b).to_lowercase());
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Number of pages needed for `count` records; an empty set still has one (empty) page.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get()).max(1)
}

/// Slice out 1-indexed `page`. Out-of-range pages (including 0) are empty.
pub fn paginate<T>(ordered: &[T], page: usize, page_size: NonZeroUsize) -> (&[T], usize) {
    let total = total_pages(ordered.len(), page_size);
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size.get()))
    else {
        return (&[], total);
    };
    if start >= ordered.len() {
        return (&[], total);
    }
    let end = start.saturating_add(page_size.get()).min(ordered.len());
    (&ordered[start..end], total)
}

/// Filter, sort and paginate `records` according to `state`.
pub fn run_query<'a>(records: &'a [Connection], state: &QueryState) -> QueryPage<'a> {
    let mut matches = filter(records, &state.search_term);
    sort(&mut matches, state.sort);
    let (items, total_pages) = paginate(&matches, state.current_page, state.page_size);
    QueryPage {
        items: items.to_vec(),
        page: state.current_page,
        total_pages,
        total_matches: matches.len(),
    }
}

/// Render the connections table header: the hotkey letter of each column is
/// highlighted and the active sort column carries its direction indicator.
pub fn render_headers(
    sort: Option<SortSpec>,
    header_style: Style,
    key_color: Color,
) -> Vec<Line<'static>> {
    SortKey::iter()
        .map(|key| {
            let name = key.to_string();
            let mut spans = vec![];
            match name.to_lowercase().find(key.hotkey()) {
                Some(pos) => {
                    let (before, rest) = name.split_at(pos);
                    let (key_str, after) = rest.split_at(key.hotkey().len_utf8());
                    if !before.is_empty() {
                        spans.push(Span::styled(before.to_string(), header_style));
                    }
                    spans.push(Span::styled(key_str.to_string(), header_style.fg(key_color)));
                    if !after.is_empty() {
                        spans.push(Span::styled(after.to_string(), header_style));
                    }
                }
                None => spans.push(Span::styled(name, header_style)),
            }

            if let Some(spec) = sort.filter(|spec| spec.key == key) {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(spec.direction.indicator(), header_style));
            }

            Line::from(spans).left_aligned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::model::common::ConnectionId;
    use rstest::rstest;

    fn conn(id: i64, integration: &str, name: &str, source: &str) -> Connection {
        Connection {
            id: ConnectionId::Number(id),
            integration: integration.to_string(),
            name: name.to_string(),
            source: source.to_string(),
            entity: "ABC Group Ltd".to_string(),
            interval: "Daily".to_string(),
            icon: String::new(),
        }
    }

    fn ids(items: &[&Connection]) -> Vec<ConnectionId> {
        items.iter().map(|c| c.id.clone()).collect()
    }

    fn page_size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn sample() -> Vec<Connection> {
        vec![
            conn(1, "Power BI", "Board pack", "Carbon"),
            conn(2, "Kafka", "orders stream", "Utilities"),
            conn(3, "Tableau", "Emissions dashboard", "Carbon"),
            conn(4, "Zapier", "Kafka relay", "Utilities"),
            conn(5, "Amazon QuickSight", "Assets overview", "Carbon"),
        ]
    }

    fn twelve() -> Vec<Connection> {
        (1..=12)
            .map(|i| conn(i, "Kafka", &format!("Connection {i:02}"), "Carbon"))
            .collect()
    }

    #[test]
    fn test_filter_blank_term_matches_all() {
        let records = sample();
        assert_eq!(filter(&records, "").len(), records.len());
        assert_eq!(filter(&records, "   ").len(), records.len());
    }

    #[test]
    fn test_filter_matches_name_or_integration_case_insensitively() {
        let records = sample();
        let matches = filter(&records, "KAFKA");
        // Integration "Kafka" and name "Kafka relay", in input order
        assert_eq!(
            ids(&matches),
            vec![ConnectionId::Number(2), ConnectionId::Number(4)]
        );
        for m in &matches {
            assert!(
                m.name.to_lowercase().contains("kafka")
                    || m.integration.to_lowercase().contains("kafka")
            );
        }
    }

    #[test]
    fn test_filter_ignores_other_fields() {
        let records = sample();
        assert!(filter(&records, "carbon").is_empty());
        assert!(filter(&records, "ABC Group").is_empty());
    }

    #[test]
    fn test_filter_on_empty_list() {
        assert!(filter(&[], "kafka").is_empty());
    }

    #[test]
    fn test_sort_none_keeps_order() {
        let records = sample();
        let mut matches = filter(&records, "");
        sort(&mut matches, None);
        assert_eq!(ids(&matches), ids(&records.iter().collect::<Vec<_>>()));
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let records = sample();
        let mut matches = filter(&records, "");
        sort(
            &mut matches,
            Some(SortSpec {
                key: SortKey::Name,
                direction: SortDirection::Ascending,
            }),
        );
        let names: Vec<&str> = matches.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Assets overview",
                "Board pack",
                "Emissions dashboard",
                "Kafka relay",
                "orders stream"
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = sample();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let mut matches = filter(&records, "");
            sort(
                &mut matches,
                Some(SortSpec {
                    key: SortKey::Source,
                    direction,
                }),
            );
            let carbon: Vec<ConnectionId> = matches
                .iter()
                .filter(|c| c.source == "Carbon")
                .map(|c| c.id.clone())
                .collect();
            // Ties keep their original relative order
            assert_eq!(
                carbon,
                vec![
                    ConnectionId::Number(1),
                    ConnectionId::Number(3),
                    ConnectionId::Number(5)
                ]
            );
        }
    }

    #[test]
    fn test_sort_is_idempotent() {
        let records = sample();
        let spec = Some(SortSpec {
            key: SortKey::Source,
            direction: SortDirection::Descending,
        });
        let mut once = filter(&records, "");
        sort(&mut once, spec);
        let mut twice = once.clone();
        sort(&mut twice, spec);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_descending_is_reverse_of_ascending_for_distinct_keys() {
        let records = sample();
        let mut asc = filter(&records, "");
        sort(
            &mut asc,
            Some(SortSpec {
                key: SortKey::Integration,
                direction: SortDirection::Ascending,
            }),
        );
        let mut desc = filter(&records, "");
        sort(
            &mut desc,
            Some(SortSpec {
                key: SortKey::Integration,
                direction: SortDirection::Descending,
            }),
        );
        asc.reverse();
        assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn test_twelve_records_two_pages() {
        let records = twelve();
        let size = page_size(10);
        let (first, total) = paginate(&records, 1, size);
        assert_eq!(total, 2);
        assert_eq!(first.len(), 10);
        let (second, _) = paginate(&records, 2, size);
        assert_eq!(second.len(), 2);
        let (third, _) = paginate(&records, 3, size);
        assert!(third.is_empty());
    }

    #[test]
    fn test_page_zero_is_empty() {
        let records = twelve();
        let (items, total) = paginate(&records, 0, page_size(10));
        assert!(items.is_empty());
        assert_eq!(total, 2);
    }

    #[test]
    fn test_empty_set_has_one_page() {
        let records: Vec<Connection> = vec![];
        let (items, total) = paginate(&records, 1, page_size(10));
        assert!(items.is_empty());
        assert_eq!(total, 1);
    }

    #[rstest]
    #[case(0, 3)]
    #[case(1, 3)]
    #[case(7, 3)]
    #[case(9, 3)]
    #[case(12, 5)]
    #[case(12, 1)]
    #[case(5, 10)]
    fn test_pages_reconstruct_input(#[case] count: usize, #[case] size: usize) {
        let records: Vec<usize> = (0..count).collect();
        let size = page_size(size);
        let total = total_pages(records.len(), size);
        let mut rebuilt = vec![];
        for page in 1..=total {
            let (items, _) = paginate(&records, page, size);
            assert!(items.len() <= size.get());
            if !records.is_empty() {
                assert!(!items.is_empty(), "page {page} of {total} was empty");
            }
            rebuilt.extend_from_slice(items);
        }
        assert_eq!(rebuilt, records);
    }

    #[test]
    fn test_run_query_sorts_only_the_filtered_set() {
        let mut records = twelve();
        records.push(conn(13, "Power BI", "Aaa first", "Carbon"));
        let mut state = QueryState::new(page_size(10));
        state.set_search_term("kafka");
        state.toggle_sort(SortKey::Name);
        let page = run_query(&records, &state);
        assert_eq!(page.total_matches, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].name, "Connection 01");
    }

    #[test]
    fn test_search_resets_to_first_page() {
        let mut state = QueryState::new(page_size(10));
        state.set_page(3, 3);
        assert_eq!(state.current_page(), 3);

        let only_kafka = vec![conn(99, "Kafka", "Orders", "Carbon")];
        state.set_search_term("kafka");
        assert_eq!(state.current_page(), 1);
        let page = run_query(&only_kafka, &state);
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = QueryState::new(page_size(10));
        state.toggle_sort(SortKey::Name);
        assert_eq!(
            state.sort,
            Some(SortSpec {
                key: SortKey::Name,
                direction: SortDirection::Ascending
            })
        );
        state.toggle_sort(SortKey::Name);
        assert_eq!(
            state.sort.map(|s| s.direction),
            Some(SortDirection::Descending)
        );
        state.toggle_sort(SortKey::Source);
        assert_eq!(
            state.sort,
            Some(SortSpec {
                key: SortKey::Source,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn test_page_is_clamped() {
        let mut state = QueryState::new(page_size(10));
        state.set_page(7, 2);
        assert_eq!(state.current_page(), 2);
        state.set_page(0, 2);
        assert_eq!(state.current_page(), 1);
        state.set_page(2, 2);
        state.clamp_page(1);
        assert_eq!(state.current_page(), 1);
        state.clamp_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut state = QueryState::new(page_size(10));
        state.set_page(2, 2);
        state.set_page_size(page_size(5));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size().get(), 5);
    }

    #[test]
    fn test_hotkeys_round_trip() {
        for key in SortKey::iter() {
            assert_eq!(SortKey::from_hotkey(key.hotkey()), Some(key));
        }
        assert_eq!(SortKey::from_hotkey('x'), None);
    }

    #[test]
    fn test_render_headers_marks_active_sort() {
        let headers = render_headers(
            Some(SortSpec {
                key: SortKey::Interval,
                direction: SortDirection::Descending,
            }),
            Style::default(),
            Color::Red,
        );
        assert_eq!(headers.len(), 5);
        let interval: String = headers[4].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(interval, "Interval ▼");
        // "In" + highlighted "t" + "erval" + space + indicator
        assert_eq!(headers[4].spans[1].content, "t");
        let name: String = headers[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(name, "Name");
    }
}
