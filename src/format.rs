//! Best-effort cleanup of model output into plain, lightly-bulleted text.
//!
//! Generated answers arrive as a mix of markdown bold markers, real
//! newlines, and literal `\n` escape sequences. The pipeline below runs in a
//! fixed order; later steps rely on the normalization done by earlier ones,
//! and the second bold pass plus the two newline-collapse passes are kept as
//! observable behavior.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold regex"));
static STRAY_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\*[ \t]+").expect("stray star regex"));
static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("horizontal whitespace regex"));
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\*[ \t]+").expect("list marker regex"));
static DOUBLE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("double space regex"));
static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("newline run regex"));
static LONG_NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("long newline run regex"));

/// Normalizes a generated answer into plain text with `•` bullets and at
/// most one blank line between paragraphs. Idempotent on already-clean text.
pub fn format_answer(text: &str) -> String {
    // 1-2: trim, then normalize carriage-return variants to bare line feeds.
    let text = text.trim().replace("\r\n", "\n").replace('\r', "\n");
    // 3: strip **bold** markers, keeping the inner text.
    let text = BOLD.replace_all(&text, "$1").into_owned();
    // 4: a stray '*' flanked by spaces collapses into one space. Line-leading
    //    list markers have no space before them and survive for step 7.
    let text = STRAY_STAR.replace_all(&text, " ").into_owned();
    // 5: collapse runs of spaces and tabs.
    let text = HORIZONTAL_WS.replace_all(&text, " ").into_owned();
    // 6: models often emit the two-character sequence `\n` instead of a real
    //    newline; expand those into line breaks.
    let text = text.replace("\\n", "\n");
    // 7: line-leading "* " becomes a bullet.
    let text = LIST_MARKER.replace_all(&text, "• ").into_owned();
    // 8: collapse doubled spaces.
    let text = DOUBLE_SPACE.replace_all(&text, " ").into_owned();
    // 9: second bold pass over the re-expanded text.
    let text = BOLD.replace_all(&text, "$1").into_owned();
    // 10: cap newline runs at exactly two, in two passes.
    let text = NEWLINE_RUN.replace_all(&text, "\n\n").into_owned();
    LONG_NEWLINE_RUN.replace_all(&text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bold_and_caps_newline_runs() {
        assert_eq!(
            format_answer("**Hello** world\n\n\n\nBye"),
            "Hello world\n\nBye"
        );
    }

    #[test]
    fn idempotent_on_clean_text() {
        let input = "Hello world.\n\nSecond paragraph with • a bullet.";
        let once = format_answer(input);
        assert_eq!(format_answer(&once), once);
        assert_eq!(once, input);
    }

    #[test]
    fn converts_line_leading_star_to_bullet() {
        assert_eq!(format_answer("* item one"), "• item one");
    }

    #[test]
    fn expands_escaped_newlines_before_bullets() {
        assert_eq!(
            format_answer("Steps:\\n* first\\n* second"),
            "Steps:\n• first\n• second"
        );
    }

    #[test]
    fn removes_stray_stars_inside_sentences() {
        assert_eq!(format_answer("good * service"), "good service");
    }

    #[test]
    fn collapses_runs_of_spaces_and_tabs() {
        assert_eq!(format_answer("a   b\tc"), "a b c");
    }

    #[test]
    fn normalizes_carriage_returns() {
        assert_eq!(format_answer("one\r\ntwo\rthree"), "one\ntwo\nthree");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(format_answer("  padded  "), "padded");
    }

    #[test]
    fn second_bold_pass_is_harmless() {
        assert_eq!(format_answer("**a** and **b**"), "a and b");
    }

    #[test]
    fn escaped_blank_lines_are_capped() {
        assert_eq!(format_answer("one\\n\\n\\n\\ntwo"), "one\n\ntwo");
    }
}
