// src/services/topic.rs
//! Word-level view of a user message and the topic filter built on it.
//!
//! Topic extraction is a fixed two-pass filter:
//!
//! 1. one left-to-right scan that drops trigger phrases (at each position the
//!    longest matching phrase wins; gaps left by a removal are not re-scanned),
//! 2. filler words are stripped from both ends until none remain there.
//!
//! Whatever is left, joined by single spaces, is the topic. Results shorter
//! than [`MIN_TOPIC_CHARS`] become [`DEFAULT_TOPIC`].

/// Placeholder used when nothing meaningful is left of the message.
pub const DEFAULT_TOPIC: &str = "the current topic";

pub const MIN_TOPIC_CHARS: usize = 3;

/// Stripped from the start and end of the topic only.
pub const FILLER_WORDS: &[&str] = &["about", "on", "for", "a", "an", "the"];

/// Request phrasing removed wherever it appears, whatever was asked for.
pub const GENERIC_TRIGGERS: &[&str] = &[
    "create",
    "generate",
    "make",
    "write",
    "prepare",
    "design",
    "produce",
    "give",
    "help me",
    "could you",
    "would you",
    "please",
    "can",
    "you",
    "i",
    "need",
    "want",
    "i would like",
    "to me",
    "for me",
    "me",
    "some",
    "something",
];

/// Lowercased message split into words with surrounding punctuation removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn from_input(input: &str) -> Self {
        let words = input
            .to_lowercase()
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self(words)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// True when the phrase occurs as a run of whole words.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle: Vec<&str> = phrase.split_whitespace().collect();
        !needle.is_empty() && (0..self.0.len()).any(|i| self.matches_at(i, &needle))
    }

    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.contains_phrase(p))
    }

    fn matches_at(&self, start: usize, needle: &[&str]) -> bool {
        self.0.len() >= start + needle.len()
            && self.0[start..start + needle.len()]
                .iter()
                .zip(needle)
                .all(|(word, want)| word == want)
    }

    /// Pass 1: drop every occurrence of the given phrases.
    pub fn without(&self, phrases: &[&str]) -> Tokens {
        let mut needles: Vec<Vec<&str>> = phrases
            .iter()
            .map(|p| p.split_whitespace().collect::<Vec<_>>())
            .filter(|n| !n.is_empty())
            .collect();
        needles.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut kept = Vec::with_capacity(self.0.len());
        let mut i = 0;
        while i < self.0.len() {
            match needles.iter().find(|n| self.matches_at(i, n)) {
                Some(needle) => i += needle.len(),
                None => {
                    kept.push(self.0[i].clone());
                    i += 1;
                }
            }
        }
        Tokens(kept)
    }

    /// Pass 2: strip filler words from both ends.
    pub fn trim_filler(&self) -> Tokens {
        let is_filler = |w: &String| FILLER_WORDS.contains(&w.as_str());
        let start = self.0.iter().position(|w| !is_filler(w));
        let end = self.0.iter().rposition(|w| !is_filler(w));
        match (start, end) {
            (Some(start), Some(end)) => Tokens(self.0[start..=end].to_vec()),
            _ => Tokens::default(),
        }
    }

    pub fn join(&self) -> String {
        self.0.join(" ")
    }
}

/// Extracts the topic of a request, removing `specific` triggers (the
/// requested material or study mode's own words) together with
/// [`GENERIC_TRIGGERS`].
pub fn extract_topic(tokens: &Tokens, specific: &[&str]) -> String {
    let triggers: Vec<&str> = specific.iter().chain(GENERIC_TRIGGERS).copied().collect();
    let topic = tokens.without(&triggers).trim_filler().join();
    if topic.chars().count() < MIN_TOPIC_CHARS {
        DEFAULT_TOPIC.to_string()
    } else {
        topic
    }
}

/// Upper-cases the first letter of every word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKSHEET: &[&str] = &["worksheet", "worksheets"];
    const LESSON_PLAN: &[&str] = &["lesson plan", "lesson plans", "lesson"];

    fn topic(input: &str, specific: &[&str]) -> String {
        extract_topic(&Tokens::from_input(input), specific)
    }

    #[test]
    fn tokenizes_and_strips_edge_punctuation() {
        let tokens = Tokens::from_input("  Hi, can you help with MATH?! don't ");
        assert_eq!(tokens.words(), ["hi", "can", "you", "help", "with", "math", "don't"]);
    }

    #[test]
    fn phrase_matching_is_whole_word() {
        let tokens = Tokens::from_input("which history lesson plan");
        assert!(!tokens.contains_phrase("hi"));
        assert!(tokens.contains_phrase("lesson plan"));
        assert!(!tokens.contains_phrase("plan lesson"));
        assert!(!tokens.contains_phrase(""));
    }

    #[test]
    fn extracts_simple_topic() {
        assert_eq!(topic("create a worksheet on fractions", WORKSHEET), "fractions");
    }

    #[test]
    fn trigger_only_input_falls_back_to_placeholder() {
        assert_eq!(topic("worksheet", WORKSHEET), DEFAULT_TOPIC);
        assert_eq!(topic("Create a worksheet!", WORKSHEET), DEFAULT_TOPIC);
    }

    #[test]
    fn short_remainder_falls_back_to_placeholder() {
        assert_eq!(topic("worksheet on ox", WORKSHEET), DEFAULT_TOPIC);
        assert_eq!(topic("worksheet on dna", WORKSHEET), "dna");
    }

    #[test]
    fn longest_trigger_wins() {
        assert_eq!(
            topic("create a lesson plan about the water cycle", LESSON_PLAN),
            "water cycle"
        );
    }

    #[test]
    fn filler_only_stripped_at_the_ends() {
        assert_eq!(
            topic("worksheet on the causes of the first world war", WORKSHEET),
            "causes of the first world war"
        );
        assert_eq!(topic("notes on the notes", &["notes"]), DEFAULT_TOPIC);
    }

    #[test]
    fn repeated_triggers_and_fillers() {
        assert_eq!(topic("worksheet worksheet on on fractions for", WORKSHEET), "fractions");
    }

    #[test]
    fn triggers_do_not_match_inside_words() {
        // "makes" and "worksheets-style" are not the trigger words themselves.
        assert_eq!(topic("how a bee makes honey", WORKSHEET), "how a bee makes honey");
    }

    #[test]
    fn removal_does_not_rescan_gaps() {
        // Removing "worksheet" joins "lesson" and "plan" but the scan has moved on.
        let specific = &["lesson plan", "worksheet"];
        assert_eq!(topic("lesson worksheet plan fractions", specific), "lesson plan fractions");
    }

    #[test]
    fn request_words_are_removed() {
        assert_eq!(topic("make me a worksheet on volcanoes", WORKSHEET), "volcanoes");
        assert_eq!(topic("give a worksheet on volcanoes", WORKSHEET), "volcanoes");
        assert_eq!(topic("you need a worksheet on volcanoes", WORKSHEET), "volcanoes");
        assert_eq!(
            topic("Can you please give me some worksheets about the solar system?", WORKSHEET),
            "solar system"
        );
        assert_eq!(topic("I want a worksheet for my class on maps", WORKSHEET), "my class on maps");
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("fractions"), "Fractions");
        assert_eq!(title_case("the water  cycle"), "The Water Cycle");
        assert_eq!(title_case(""), "");
    }
}
