//! Multilingual lexicons for the conversational signals
//!
//! English and Indonesian token sets, matched as whole words on lowercased
//! text. Multi-word phrases match when each boundary of the phrase falls on
//! a word boundary of the utterance.

/// Short, unambiguous acknowledgement/response tokens
const RESPONSE_STRONG: &[&str] = &[
    "yes", "yeah", "yep", "no", "nope", "okay", "ok", "sure", "right", "correct", "agreed",
    "exactly", "iya", "ya", "tidak", "nggak", "gak", "enggak", "oke", "baik", "betul", "benar",
    "siap", "boleh", "setuju",
];

/// Softer backchannel/filler responses
const RESPONSE_MEDIUM: &[&str] = &[
    "hmm", "hm", "mhm", "uh-huh", "mm-hmm", "ah", "oh", "uh", "um", "i see", "got it",
    "makes sense", "fair enough", "hmm ya", "oh gitu", "begitu", "gitu", "masa", "wah", "oalah",
];

/// Interrogative words and phrases
const QUESTION: &[&str] = &[
    "what", "why", "how", "when", "where", "who", "which", "is it", "are you", "do you",
    "did you", "can you", "could you", "would you", "apa", "apakah", "kenapa", "mengapa",
    "bagaimana", "gimana", "kapan", "dimana", "di mana", "siapa", "berapa", "yang mana",
    "bukankah", "masa",
];

/// Second-person address tokens
const ADDRESS: &[&str] = &[
    "you", "your", "yours", "kamu", "anda", "kau", "lo", "lu", "elu", "mas", "mbak", "pak",
    "bu", "bro", "sis", "dude", "guys",
];

/// Turn-initial discourse markers
const DISCOURSE: &[&str] = &[
    "well", "so", "however", "actually", "anyway", "but", "look", "listen", "honestly", "tapi",
    "jadi", "terus", "lalu", "nah", "kan", "soalnya", "sebenarnya", "sebenernya", "pokoknya",
    "intinya", "makanya",
];

/// Does lowercased `text` contain any lexicon entry as a whole word/phrase?
fn contains_any(text: &str, lexicon: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    lexicon.iter().any(|entry| contains_word(&lowered, entry))
}

/// Whole-word substring search on already-lowercased text
fn contains_word(text: &str, word: &str) -> bool {
    let mut search_from = 0;
    while let Some(pos) = text[search_from..].find(word) {
        let start = search_from + pos;
        let end = start + word.len();
        let boundary_before = start == 0
            || !text[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let boundary_after = end == text.len()
            || !text[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
        if boundary_before && boundary_after {
            return true;
        }
        search_from = start + word.len().max(1);
    }
    false
}

/// Strong acknowledgement/response match ("yes", "iya", ...)
pub fn is_strong_response(text: &str) -> bool {
    contains_any(text, RESPONSE_STRONG)
}

/// Softer backchannel match ("hmm", "oh gitu", ...)
pub fn is_medium_response(text: &str) -> bool {
    contains_any(text, RESPONSE_MEDIUM)
}

/// Any response-word match, strong or medium
pub fn is_response(text: &str) -> bool {
    is_strong_response(text) || is_medium_response(text)
}

/// Does the text read as a question (trailing `?` or interrogative word)?
pub fn is_question(text: &str) -> bool {
    text.trim_end().ends_with('?') || contains_any(text, QUESTION)
}

/// Second-person address ("you", "kamu", "anda", ...)
pub fn is_direct_address(text: &str) -> bool {
    contains_any(text, ADDRESS)
}

/// Turn-initial discourse marker ("well", "tapi", "jadi", ...)
pub fn has_discourse_marker(text: &str) -> bool {
    contains_any(text, DISCOURSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_matching() {
        // "so" must not match inside "sofa" or "absolutely"
        assert!(has_discourse_marker("so what happened next"));
        assert!(!has_discourse_marker("the sofa was absolutely fine"));
    }

    #[test]
    fn test_strong_response() {
        assert!(is_strong_response("Yes, I agree"));
        assert!(is_strong_response("iya betul sekali"));
        assert!(!is_strong_response("yesterday was fine"));
    }

    #[test]
    fn test_medium_response() {
        assert!(is_medium_response("hmm, not sure"));
        assert!(is_medium_response("oh gitu ya ceritanya"));
        assert!(!is_medium_response("the ohm reading was high"));
    }

    #[test]
    fn test_question_detection() {
        assert!(is_question("What do you think?"));
        assert!(is_question("we could ship it today?"));
        assert!(is_question("gimana menurutmu"));
        assert!(!is_question("that settles it then"));
    }

    #[test]
    fn test_direct_address() {
        assert!(is_direct_address("What do you think"));
        assert!(is_direct_address("kamu sudah makan"));
        assert!(!is_direct_address("the youth program"));
    }

    #[test]
    fn test_multiword_phrase() {
        assert!(is_question("di mana filenya disimpan"));
        assert!(is_medium_response("ok i see now"));
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        assert!(!is_response(""));
        assert!(!is_question(""));
        assert!(!is_direct_address(""));
        assert!(!has_discourse_marker(""));
    }
}
