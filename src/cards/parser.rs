//! Line-oriented parser for `Q:`/`A:` bulk text
//!
//! There is no escaping: a line beginning with `Q:` or `A:` is always a
//! marker, so a literal marker cannot be embedded inside a field.

use super::models::Card;

/// Parse marked text into cards, one per complete question/answer pair.
///
/// Single pass over the lines with two buffers. A `Q:` line flushes any
/// complete buffered pair and starts a new question; an `A:` line replaces
/// the answer buffer outright; any other line continues whichever field is
/// open, answer first. A pair with either side empty is never emitted.
/// Output order matches input order.
pub fn parse_qa(text: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    let mut question = String::new();
    let mut answer = String::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("Q:") {
            if !question.is_empty() && !answer.is_empty() {
                cards.push(Card::new(&question, &answer));
                answer.clear();
            }
            question = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("A:") {
            answer = rest.trim().to_string();
        } else {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !answer.is_empty() {
                answer.push(' ');
                answer.push_str(line);
            } else if !question.is_empty() {
                question.push(' ');
                question.push_str(line);
            }
            // No open field: the line has nothing to attach to
        }
    }

    if !question.is_empty() && !answer.is_empty() {
        cards.push(Card::new(&question, &answer));
    }

    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_pairs() {
        let cards = parse_qa("Q: What is Rust?\nA: A systems language\nQ: Year?\nA: 2015");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What is Rust?");
        assert_eq!(cards[0].answer, "A systems language");
        assert_eq!(cards[1].question, "Year?");
        assert_eq!(cards[1].answer, "2015");
    }

    #[test]
    fn test_continuation_joins_answer_lines() {
        let cards = parse_qa("Q: What is 2+2?\nA: It is\n4\nQ: Next?\nA: Yes");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].answer, "It is 4");
        assert_eq!(cards[1].answer, "Yes");
    }

    #[test]
    fn test_continuation_joins_question_lines() {
        let cards = parse_qa("Q: What is\nthe capital of France?\nA: Paris");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is the capital of France?");
    }

    #[test]
    fn test_unterminated_question_emits_nothing() {
        let cards = parse_qa("Q: Done?\nA: Yes\nQ: Dangling question");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Done?");
    }

    #[test]
    fn test_new_answer_marker_replaces_partial_answer() {
        let cards = parse_qa("Q: q\nA: first draft\nA: final");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].answer, "final");
    }

    #[test]
    fn test_lines_before_first_marker_are_discarded() {
        let cards = parse_qa("preamble\nmore preamble\nQ: q\nA: a");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "q");
    }

    #[test]
    fn test_blank_lines_do_not_pad_fields() {
        let cards = parse_qa("Q: q\n\nA: part one\n\npart two");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].answer, "part one part two");
    }

    #[test]
    fn test_crlf_input() {
        let cards = parse_qa("Q: q\r\nA: a\r\n");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "q");
        assert_eq!(cards[0].answer, "a");
    }

    #[test]
    fn test_empty_input_yields_no_cards() {
        assert!(parse_qa("").is_empty());
        assert!(parse_qa("no markers anywhere").is_empty());
    }

    #[test]
    fn test_emitted_cards_get_fresh_defaults() {
        let cards = parse_qa("Q: q\nA: a\nQ: q\nA: a");
        assert_ne!(cards[0].id, cards[1].id);
        assert!(!cards[0].starred);
        assert!(cards[0].tags.is_empty());
    }
}
