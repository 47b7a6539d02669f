use crate::models::FlashcardPair;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Question text stays on one line; whitespace around it may not.
    static ref CARD_HEAD: Regex = Regex::new(r"Q:\s*(.*?)\s*A:").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap();
}

const NEXT_CARD: &str = "\nQ:";

/// Extract question/answer pairs from loosely formatted flashcard text.
///
/// Tries strict `Q: ... A: ...` matching first and falls back to
/// case-insensitive markers inside blank-line separated blocks. Returns an
/// empty vector when neither recognizes anything.
pub fn parse_flashcards(raw: &str) -> Vec<FlashcardPair> {
    let cards = parse_marked_pairs(raw);
    if !cards.is_empty() {
        return cards;
    }

    if !BLANK_LINES.is_match(raw) {
        return cards;
    }

    let cards = parse_blocks(raw);
    log::debug!("Flashcard fallback pass recovered {} cards", cards.len());
    cards
}

fn parse_marked_pairs(raw: &str) -> Vec<FlashcardPair> {
    let mut cards = Vec::new();
    let mut pos = 0;

    while let Some(caps) = CARD_HEAD.captures_at(raw, pos) {
        let (Some(head), Some(question)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let answer_start = head.end();
        let answer_end = raw[answer_start..]
            .find(NEXT_CARD)
            .map(|offset| answer_start + offset)
            .unwrap_or(raw.len());

        cards.push(FlashcardPair {
            question: question.as_str().trim().to_string(),
            answer: raw[answer_start..answer_end].trim().to_string(),
        });

        if answer_end >= raw.len() {
            break;
        }
        pos = answer_end;
    }

    cards
}

fn parse_blocks(raw: &str) -> Vec<FlashcardPair> {
    BLANK_LINES
        .split(raw)
        .filter_map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Option<FlashcardPair> {
    // ASCII lowercasing keeps byte offsets aligned with `block`.
    let lowered = block.to_ascii_lowercase();
    let q_index = lowered.find("q:")?;
    let a_index = q_index + 2 + lowered[q_index + 2..].find("a:")?;

    let question = block[q_index + 2..a_index].trim();
    let answer = block[a_index + 2..].trim();

    if question.is_empty() || answer.is_empty() {
        return None;
    }

    Some(FlashcardPair {
        question: question.to_string(),
        answer: answer.to_string(),
    })
}

/// Split a bullet summary into display points, dropping `- `/`* ` markers and blank lines.
pub fn summary_points(summary: &str) -> Vec<String> {
    summary
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .unwrap_or(line)
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(question: &str, answer: &str) -> FlashcardPair {
        FlashcardPair {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_parse_inline_pairs() {
        let raw = "Q: What is 2+2? A: 4\nQ: Capital of France? A: Paris";
        let cards = parse_flashcards(raw);
        assert_eq!(
            cards,
            vec![pair("What is 2+2?", "4"), pair("Capital of France?", "Paris")]
        );
    }

    #[test]
    fn test_parse_answer_on_next_line() {
        let raw = "Q: What is Rust?\nA: A systems language.\n\nQ: Who maintains it?\nA: The Rust project.";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0], pair("What is Rust?", "A systems language."));
        assert_eq!(cards[1], pair("Who maintains it?", "The Rust project."));
    }

    #[test]
    fn test_parse_multiline_answer() {
        let raw = "Q: Name the phases\nA: First, answering.\nThen, submitted.\nQ: Next? A: Done";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].answer, "First, answering.\nThen, submitted.");
        assert_eq!(cards[1], pair("Next?", "Done"));
    }

    #[test]
    fn test_parse_ignores_preamble() {
        let raw = "Here are your flashcards:\n\nQ: One? A: 1";
        assert_eq!(parse_flashcards(raw), vec![pair("One?", "1")]);
    }

    #[test]
    fn test_mid_line_q_marker_stays_in_answer() {
        let raw = "Q: Marker? A: Write Q: before the question\nQ: Second? A: Yes";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].answer, "Write Q: before the question");
    }

    #[test]
    fn test_empty_answer_stops_at_next_card() {
        let cards = parse_flashcards("Q: x A:\nQ: y A: z");
        assert_eq!(cards, vec![pair("x", ""), pair("y", "z")]);
    }

    #[test]
    fn test_fallback_lowercase_blocks() {
        let raw = "q: What is ownership?\na: Each value has one owner.\n\nq: What is borrowing?\na: Referencing without owning.";
        let cards = parse_flashcards(raw);
        assert_eq!(
            cards,
            vec![
                pair("What is ownership?", "Each value has one owner."),
                pair("What is borrowing?", "Referencing without owning."),
            ]
        );
    }

    #[test]
    fn test_fallback_multiline_question() {
        let raw = "Q: What does the\nborrow checker enforce?\nA: Aliasing rules.\n\n\nQ: Is it\noptional?\nA: No.";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What does the\nborrow checker enforce?");
        assert_eq!(cards[1], pair("Is it\noptional?", "No."));
    }

    #[test]
    fn test_fallback_skipped_when_primary_matches() {
        let raw = "Q: What does the\nborrow checker enforce?\nA: Aliasing rules.\n\nQ: Is it optional?\nA: No.";
        assert_eq!(parse_flashcards(raw), vec![pair("Is it optional?", "No.")]);
    }

    #[test]
    fn test_fallback_blank_line_with_spaces() {
        let raw = "q: one\na: 1\n   \nq: two\na: 2";
        assert_eq!(parse_flashcards(raw).len(), 2);
    }

    #[test]
    fn test_fallback_a_marker_must_follow_q() {
        let raw = "Data: ignored\nq: kept? a: yes\n\nq: no answer here";
        let cards = parse_flashcards(raw);
        assert_eq!(cards, vec![pair("kept?", "yes")]);
    }

    #[test]
    fn test_fallback_skips_empty_sides() {
        let raw = "q: a: only answer\n\nq: only question a:   ";
        assert!(parse_flashcards(raw).is_empty());
    }

    #[test]
    fn test_fallback_requires_blank_lines() {
        let raw = "q: lowercase? a: but one block";
        assert!(parse_flashcards(raw).is_empty());
    }

    #[test]
    fn test_no_markers_returns_empty() {
        assert!(parse_flashcards("Just some prose about PDFs.").is_empty());
        assert!(parse_flashcards("para one\n\npara two").is_empty());
        assert!(parse_flashcards("").is_empty());
    }

    #[test]
    fn test_non_ascii_text_keeps_boundaries() {
        let raw = "q: Qu'est-ce que «Ünïcode»?\na: Un standard — très large.\n\nq: Ça va?\na: Oui";
        let cards = parse_flashcards(raw);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "Qu'est-ce que «Ünïcode»?");
        assert_eq!(cards[1].answer, "Oui");
    }

    #[test]
    fn test_summary_points_strip_bullets() {
        let summary = "- First point\n* Second point\n\n   \n  Third point  \n-not a bullet";
        assert_eq!(
            summary_points(summary),
            vec![
                "First point".to_string(),
                "Second point".to_string(),
                "Third point".to_string(),
                "-not a bullet".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary_points_empty() {
        assert!(summary_points("\n\n  \n").is_empty());
    }
}
