//! Exact-match FAQ lookup

use std::collections::HashMap;

/// Reply used when a question has no FAQ entry
pub const FALLBACK_ANSWER: &str =
    "I'm not sure how to help with that. Try asking about our services or say 'Speak to Support'.";

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    (
        "What services do you offer?",
        "At Udiwonder, we provide top-notch automation, tech integration, sales funnel design, and website setup to help businesses save time and increase revenue. Visit https://udiwonder.com for more details.",
    ),
    (
        "How do I contact support?",
        "You can contact us by emailing support@udiwonder.com or by replying 'Speak to Support' here on WhatsApp.",
    ),
    (
        "What is the Define, Design, Deploy process?",
        "Our 3D process is our service blueprint. Define: Understanding your needs. Design: Bringing ideas to life. Deploy: Making your solution live. More details at https://udiwonder.com.",
    ),
    (
        "How do I start a project with Udiwonder?",
        "To start a project, visit https://udiwonder.com and fill out our contact form, or reply 'Get Started' here on WhatsApp.",
    ),
];

/// Immutable question → answer table
///
/// Matching is exact and case-sensitive after trimming surrounding whitespace.
/// There is no partial, substring, or synonym matching.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    entries: HashMap<String, String>,
}

impl FaqMatcher {
    /// Build a matcher from question/answer pairs
    pub fn new<I, Q, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(q, a)| (q.into(), a.into()))
                .collect(),
        }
    }

    /// Answer for `question`, or [`FALLBACK_ANSWER`]
    pub fn answer(&self, question: &str) -> &str {
        self.entries
            .get(question.trim())
            .map(String::as_str)
            .unwrap_or(FALLBACK_ANSWER)
    }

    /// Known questions, sorted
    pub fn questions(&self) -> Vec<&str> {
        let mut questions: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        questions.sort_unstable();
        questions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FaqMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICES_ANSWER: &str = "At Udiwonder, we provide top-notch automation, tech integration, sales funnel design, and website setup to help businesses save time and increase revenue. Visit https://udiwonder.com for more details.";

    #[test]
    fn test_default_table() {
        let faq = FaqMatcher::default();
        assert_eq!(faq.len(), 4);
        assert!(faq.questions().contains(&"How do I contact support?"));
    }

    #[test]
    fn test_exact_match() {
        let faq = FaqMatcher::default();
        assert_eq!(faq.answer("What services do you offer?"), SERVICES_ANSWER);
    }

    #[test]
    fn test_fallback() {
        let faq = FaqMatcher::default();
        assert_eq!(faq.answer("gibberish"), FALLBACK_ANSWER);
        assert_eq!(faq.answer(""), FALLBACK_ANSWER);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let faq = FaqMatcher::default();
        assert_eq!(
            faq.answer("  What services do you offer?\n"),
            faq.answer("What services do you offer?")
        );
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let faq = FaqMatcher::default();
        assert_eq!(faq.answer("what services do you offer?"), FALLBACK_ANSWER);
        assert_eq!(faq.answer("What services do you offer"), FALLBACK_ANSWER);
        assert_eq!(faq.answer("services"), FALLBACK_ANSWER);
        assert_eq!(
            faq.answer("What  services do you offer?"),
            FALLBACK_ANSWER
        );
    }

    #[test]
    fn test_repeated_calls_agree() {
        let faq = FaqMatcher::default();
        let first = faq.answer("How do I contact support?").to_string();
        for _ in 0..3 {
            assert_eq!(faq.answer("How do I contact support?"), first);
        }
    }

    #[test]
    fn test_custom_entries() {
        let faq = FaqMatcher::new([("Opening hours?", "9 to 5.")]);
        assert_eq!(faq.answer("Opening hours?"), "9 to 5.");
        assert_eq!(faq.answer("What services do you offer?"), FALLBACK_ANSWER);
    }
}
