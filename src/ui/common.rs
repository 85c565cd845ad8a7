use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use super::constants::{BLUE, CYAN, MAGENTA, YELLOW};

/// Map a string to a consistent color using hash-based mapping.
/// Integrations keep the same badge color across services and connections.
pub fn hash_to_color(input: &str) -> Color {
    const COLORS: &[Color] = &[
        BLUE,
        Color::Rgb(0x7f, 0xbb, 0xca),
        Color::Rgb(0x5a, 0x8f, 0xb0),
        MAGENTA,
        Color::Rgb(0xb5, 0x89, 0xd6),
        Color::Rgb(0x9d, 0x79, 0xd6),
        CYAN,
        Color::Rgb(0x6a, 0xa8, 0x9a),
        Color::Rgb(0xd6, 0x99, 0x78),
        Color::Rgb(0xc0, 0x85, 0x68),
        Color::Rgb(0xd6, 0x9c, 0xb8),
        Color::Rgb(0xa8, 0xa0, 0x78),
        Color::Rgb(0x7a, 0x8b, 0x99),
    ];

    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    let hash = hasher.finish();

    #[allow(clippy::cast_possible_truncation)]
    COLORS[(hash as usize) % COLORS.len()]
}

/// Split `text` into spans, highlighting every case-insensitive occurrence of `search_term`.
pub fn highlight_search_text<'a>(
    text: &str,
    search_term: Option<&str>,
    base_color: Color,
) -> Vec<Span<'a>> {
    let base = Style::default().fg(base_color);
    let needle = search_term.map(str::trim).unwrap_or_default().to_lowercase();
    if needle.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let highlight = Style::default()
        .fg(Color::Black)
        .bg(YELLOW)
        .add_modifier(Modifier::BOLD);

    // Lowercasing can change byte lengths outside ASCII, so every byte of the
    // lowercased haystack remembers the bounds of the char it came from
    let mut haystack = String::with_capacity(text.len());
    let mut origins: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let end = start + c.len_utf8();
        for lower in c.to_lowercase() {
            haystack.push(lower);
            origins.extend(std::iter::repeat_n((start, end), lower.len_utf8()));
        }
    }

    let mut spans = vec![];
    let mut last = 0;
    for (idx, matched) in haystack.match_indices(&needle) {
        let start = origins[idx].0;
        let end = origins[idx + matched.len() - 1].1;
        // Two matches inside one expanded char
        if start < last {
            continue;
        }
        if start > last {
            spans.push(Span::styled(text[last..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), highlight));
        last = end;
    }
    if last < text.len() {
        spans.push(Span::styled(text[last..].to_string(), base));
    }
    spans
}

/// Short letter badge standing in for an integration's image icon
pub fn icon_badge<'a>(name: &str) -> Span<'a> {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    let label = if initials.is_empty() { "?".to_string() } else { initials };
    Span::styled(
        format!(" {label:<2} "),
        Style::default()
            .fg(Color::Black)
            .bg(hash_to_color(name))
            .add_modifier(Modifier::BOLD),
    )
}
