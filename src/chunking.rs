//! Paragraph-based chunking for the import pipeline.

use std::sync::LazyLock;

use regex::Regex;

static PARAGRAPH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("paragraph split regex"));

/// Splits `text` into chunks of at most `max_size` characters, never breaking
/// inside a paragraph.
///
/// Paragraphs are runs of text separated by one or more newlines. Trimmed
/// paragraphs accumulate greedily into a space-joined buffer; once appending
/// the next paragraph would push the buffer past `max_size`, the buffer is
/// emitted and that paragraph starts a new one. A single paragraph longer
/// than `max_size` becomes an oversized chunk on its own. Empty input, or
/// input whose paragraphs are all blank, yields no chunks. Output order is
/// deterministic and follows the input.
pub fn chunk(text: &str, max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();

    for paragraph in PARAGRAPH_SPLIT.split(text) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        // The candidate length counts the joining space even when the buffer
        // is empty; the phantom separator is trimmed away on emit.
        if buffer.len() + 1 + paragraph.len() > max_size {
            if !buffer.is_empty() {
                chunks.push(buffer.trim().to_string());
            }
            buffer = paragraph.to_string();
        } else {
            buffer.push(' ');
            buffer.push_str(paragraph);
        }
    }

    if !buffer.is_empty() {
        chunks.push(buffer.trim().to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk("", 500).is_empty());
    }

    #[test]
    fn blank_paragraphs_yield_no_chunks() {
        assert!(chunk("\n\n\n", 500).is_empty());
        assert!(chunk("   \n\t\n  ", 500).is_empty());
    }

    #[test]
    fn single_short_paragraph_is_one_chunk() {
        assert_eq!(chunk("A short line.", 500), vec!["A short line."]);
    }

    #[test]
    fn boundary_counts_the_joining_separator() {
        // "Alpha" alone fits in 8; appending "Beta" would make the joined
        // length 11, so the buffer is flushed first.
        assert_eq!(chunk("Alpha \nBeta", 8), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn oversized_paragraph_is_never_split() {
        let long = "x".repeat(600);
        let text = format!("short one\n{long}\nshort two");
        let chunks = chunk(&text, 500);
        assert_eq!(chunks, vec!["short one".to_string(), long, "short two".to_string()]);
    }

    #[test]
    fn paragraphs_accumulate_up_to_the_limit() {
        let chunks = chunk("one\ntwo\nthree", 12);
        // The buffer holds " one two" (8 chars with the phantom separator);
        // adding "three" would reach 14.
        assert_eq!(chunks, vec!["one two", "three"]);
    }

    #[test]
    fn every_paragraph_appears_exactly_once_in_order() {
        let text = "first paragraph\n\nsecond paragraph\nthird\n\n\nfourth one here";
        let chunks = chunk(text, 30);
        let rejoined: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.split(' '))
            .collect();
        let expected: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .flat_map(|p| p.split(' '))
            .collect();
        assert_eq!(rejoined, expected);
    }

    #[test]
    fn carriage_returns_are_trimmed_from_paragraphs() {
        assert_eq!(chunk("one\r\ntwo\r\n", 500), vec!["one two"]);
    }

    #[test]
    fn identical_input_chunks_identically() {
        let text = "alpha beta\ngamma delta\nepsilon";
        assert_eq!(chunk(text, 15), chunk(text, 15));
    }
}
