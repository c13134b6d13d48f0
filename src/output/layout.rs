//! Reflow of draft text into page-width lines and pages

use crate::output::font_metrics::{measure_mm, POINTS_TO_MM};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub text_width_mm: f32,
    pub font_size_pt: f32,
    pub line_height_factor: f32,
}

impl PageLayout {
    pub fn line_height_mm(&self) -> f32 {
        self.font_size_pt * self.line_height_factor * POINTS_TO_MM
    }

    /// Baselines that fit between the top and bottom margins, at least one.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - 2.0 * self.margin_mm;
        let lines = usable / self.line_height_mm();
        // Zero, negative or non-finite geometry degrades to one line per page
        if !lines.is_finite() || lines <= 0.0 {
            return 1;
        }
        (lines.floor() as usize).saturating_add(1)
    }

    pub fn wrap(&self, text: &str) -> Vec<String> {
        wrap_text(text, self.text_width_mm, self.font_size_pt)
    }

    /// Wrapped lines grouped into pages. Always at least one page.
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let lines = self.wrap(text);
        let mut pages: Vec<Vec<String>> = lines
            .chunks(self.lines_per_page())
            .map(|chunk| chunk.to_vec())
            .collect();
        if pages.is_empty() {
            pages.push(Vec::new());
        }
        pages
    }
}

/// Break `text` into lines no wider than `max_width_mm`.
///
/// Existing line breaks are kept, blank lines included. Words are packed
/// greedily and separated by single spaces; a word wider than a line is
/// split at grapheme boundaries. Leading indentation of a paragraph is kept
/// on its first line.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, max_width_mm, font_size_pt, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, max_width_mm: f32, font_size_pt: f32, lines: &mut Vec<String>) {
    let fits = |s: &str| measure_mm(s, font_size_pt) <= max_width_mm;

    if paragraph.trim().is_empty() {
        lines.push(String::new());
        return;
    }

    let mut line: String = paragraph
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { "    " } else { " " })
        .collect();
    let mut has_words = false;

    for word in paragraph.split_whitespace() {
        let candidate = if has_words {
            format!("{} {}", line, word)
        } else {
            format!("{}{}", line, word)
        };
        if fits(&candidate) {
            line = candidate;
            has_words = true;
            continue;
        }

        if has_words {
            lines.push(std::mem::take(&mut line));
        } else {
            line.clear();
        }

        if fits(word) {
            line = word.to_string();
        } else {
            let mut chunks = break_word(word, max_width_mm, font_size_pt);
            line = chunks.pop().unwrap_or_default();
            lines.extend(chunks);
        }
        has_words = true;
    }

    if has_words {
        lines.push(line);
    }
}

fn break_word(word: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for grapheme in word.graphemes(true) {
        let candidate = format!("{}{}", current, grapheme);
        if !current.is_empty() && measure_mm(&candidate, font_size_pt) > max_width_mm {
            chunks.push(std::mem::replace(&mut current, grapheme.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
