#![forbid(unsafe_code)]

//! Display-width aware text helpers for the card.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal display width of `text`.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wrap `text` into lines no wider than `max_width` columns.
///
/// Words are kept whole when they fit; a word wider than the line is split
/// on grapheme boundaries. Blank input lines are preserved as empty lines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);

            if word_width > max_width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let mut pieces = split_by_width(word, max_width);
                // The tail stays open so following words can join it.
                if let Some(tail) = pieces.pop() {
                    lines.extend(pieces);
                    current_width = display_width(&tail);
                    current = tail;
                }
                continue;
            }

            if current_width == 0 {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Cut `text` to at most `max_width` columns, never splitting a grapheme.
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0usize;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = display_width(grapheme);
        if used + w > max_width {
            return &text[..offset];
        }
        used += w;
    }
    text
}

fn split_by_width(word: &str, max_width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut used = 0usize;
    for grapheme in word.graphemes(true) {
        let w = display_width(grapheme);
        if used + w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            used = 0;
        }
        piece.push_str(grapheme);
        used += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
