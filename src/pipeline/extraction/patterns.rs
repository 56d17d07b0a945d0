//! Ordered pattern tables for questions, answers and definitions.
//!
//! Each table is a list of `(tag, regex)` pairs evaluated first-match-wins.
//! Order is significant: a numbered line must be claimed by the numbered
//! rule before the lettered rule gets a chance to see it.

use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Pattern '{pattern}' needs {required} capture group(s), has {found}")]
    MissingCaptureGroup {
        pattern: String,
        required: usize,
        found: usize,
    },
}

/// Question conventions, highest precedence first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStyle {
    /// `1. What is ...`
    Numbered,
    /// `A. What is ...`
    Lettered,
    /// `Question 3: What is ...`
    Labeled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStyle {
    /// `A.` through `D.`
    LetteredOption,
    /// `Answer: ...`
    Labeled,
}

/// Separator between a term and its definition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConceptDelimiter {
    Colon,
    Equals,
    Dash,
}

/// A compiled regex carrying the tag it reports when it matches.
#[derive(Debug, Clone)]
pub struct TaggedPattern<T> {
    pub tag: T,
    regex: Regex,
}

impl<T: Copy> TaggedPattern<T> {
    /// Compile `pattern`, requiring at least `groups` capture groups.
    pub fn new(tag: T, pattern: &str, groups: usize) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;

        // captures_len counts the implicit whole-match group
        let found = regex.captures_len() - 1;
        if found < groups {
            return Err(PatternError::MissingCaptureGroup {
                pattern: pattern.to_string(),
                required: groups,
                found,
            });
        }

        Ok(Self { tag, regex })
    }

    /// First capture group of a match, untrimmed.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Leftmost match starting at or after byte offset `start`.
    pub fn captures_at<'t>(&self, text: &'t str, start: usize) -> Option<Captures<'t>> {
        self.regex.captures_at(text, start)
    }
}

/// Immutable pattern tables shared by every extraction call.
#[derive(Debug, Clone)]
pub struct PatternSet {
    questions: Vec<TaggedPattern<QuestionStyle>>,
    answers: Vec<TaggedPattern<AnswerStyle>>,
    concepts: Vec<TaggedPattern<ConceptDelimiter>>,
}

static STANDARD: LazyLock<Arc<PatternSet>> = LazyLock::new(|| {
    Arc::new(build_standard().expect("Invalid built-in extraction pattern"))
});

fn build_standard() -> Result<PatternSet, PatternError> {
    PatternSet::new(
        &[
            (QuestionStyle::Numbered, r"(?i)^\d+\.\s*(.+)$"),
            (QuestionStyle::Lettered, r"(?i)^[A-Z]\.\s*(.+)$"),
            (QuestionStyle::Labeled, r"(?i)^Question\s*\d+:\s*(.+)$"),
        ],
        &[
            (AnswerStyle::LetteredOption, r"(?i)^[A-D]\.\s*(.+)$"),
            (AnswerStyle::Labeled, r"(?i)^Answer:\s*(.+)$"),
        ],
        &[
            (ConceptDelimiter::Colon, r"(?m)([A-Z][A-Za-z\s]+):\s*(.+)$"),
            (ConceptDelimiter::Equals, r"(?m)([A-Z][A-Za-z\s]+)=\s*(.+)$"),
            (ConceptDelimiter::Dash, r"(?m)([A-Z][A-Za-z\s]+)-\s*(.+)$"),
        ],
    )
}

impl PatternSet {
    /// Build a custom set. Question and answer patterns need one capture
    /// group (the payload); concept patterns need two (term, definition).
    pub fn new(
        questions: &[(QuestionStyle, &str)],
        answers: &[(AnswerStyle, &str)],
        concepts: &[(ConceptDelimiter, &str)],
    ) -> Result<Self, PatternError> {
        Ok(Self {
            questions: compile(questions, 1)?,
            answers: compile(answers, 1)?,
            concepts: compile(concepts, 2)?,
        })
    }

    /// The built-in conventions, compiled once per process.
    pub fn standard() -> Arc<PatternSet> {
        Arc::clone(&STANDARD)
    }

    pub fn questions(&self) -> &[TaggedPattern<QuestionStyle>] {
        &self.questions
    }

    pub fn answers(&self) -> &[TaggedPattern<AnswerStyle>] {
        &self.answers
    }

    pub fn concepts(&self) -> &[TaggedPattern<ConceptDelimiter>] {
        &self.concepts
    }

    /// First question pattern matching `line`, with its raw payload.
    pub fn match_question<'t>(&self, line: &'t str) -> Option<(QuestionStyle, &'t str)> {
        first_match(&self.questions, line)
    }

    /// First answer pattern matching `line`, with its raw payload.
    pub fn match_answer<'t>(&self, line: &'t str) -> Option<(AnswerStyle, &'t str)> {
        first_match(&self.answers, line)
    }

    /// Whether any question pattern matches `line`.
    pub fn is_question(&self, line: &str) -> bool {
        self.questions.iter().any(|p| p.is_match(line))
    }
}

fn compile<T: Copy>(
    specs: &[(T, &str)],
    groups: usize,
) -> Result<Vec<TaggedPattern<T>>, PatternError> {
    specs
        .iter()
        .map(|(tag, pattern)| TaggedPattern::new(*tag, pattern, groups))
        .collect()
}

fn first_match<'t, T: Copy>(patterns: &[TaggedPattern<T>], line: &'t str) -> Option<(T, &'t str)> {
    patterns
        .iter()
        .find_map(|p| p.capture(line).map(|payload| (p.tag, payload)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_compiles_in_order() {
        let set = PatternSet::standard();
        let tags: Vec<_> = set.questions().iter().map(|p| p.tag).collect();
        assert_eq!(
            tags,
            vec![QuestionStyle::Numbered, QuestionStyle::Lettered, QuestionStyle::Labeled]
        );
        let tags: Vec<_> = set.answers().iter().map(|p| p.tag).collect();
        assert_eq!(tags, vec![AnswerStyle::LetteredOption, AnswerStyle::Labeled]);
        let tags: Vec<_> = set.concepts().iter().map(|p| p.tag).collect();
        assert_eq!(
            tags,
            vec![ConceptDelimiter::Colon, ConceptDelimiter::Equals, ConceptDelimiter::Dash]
        );
    }

    #[test]
    fn standard_set_is_shared() {
        let a = PatternSet::standard();
        let b = PatternSet::standard();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn numbered_question_matches() {
        let set = PatternSet::standard();
        assert_eq!(
            set.match_question("12. Describe the water cycle"),
            Some((QuestionStyle::Numbered, "Describe the water cycle"))
        );
    }

    #[test]
    fn lettered_question_is_case_insensitive() {
        let set = PatternSet::standard();
        assert_eq!(
            set.match_question("b. Which organelle makes ATP?"),
            Some((QuestionStyle::Lettered, "Which organelle makes ATP?"))
        );
    }

    #[test]
    fn labeled_question_matches() {
        let set = PatternSet::standard();
        assert_eq!(
            set.match_question("Question 4: Define entropy in a closed system"),
            Some((QuestionStyle::Labeled, "Define entropy in a closed system"))
        );
        assert_eq!(
            set.match_question("QUESTION2:   Name three noble gases"),
            Some((QuestionStyle::Labeled, "Name three noble gases"))
        );
    }

    #[test]
    fn prose_is_not_a_question() {
        let set = PatternSet::standard();
        assert!(set.match_question("Plants convert light to energy.").is_none());
        assert!(!set.is_question("The answer is below"));
        assert!(!set.is_question("1."));
    }

    #[test]
    fn answer_patterns_in_order() {
        let set = PatternSet::standard();
        assert_eq!(
            set.match_answer("C. Mitochondria"),
            Some((AnswerStyle::LetteredOption, "Mitochondria"))
        );
        assert_eq!(
            set.match_answer("answer: the nucleus"),
            Some((AnswerStyle::Labeled, "the nucleus"))
        );
        // E is outside the option range
        assert!(set.match_answer("E. Golgi body").is_none());
    }

    #[test]
    fn custom_set_requires_capture_groups() {
        let err = PatternSet::new(&[(QuestionStyle::Numbered, r"^\d+\.")], &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            PatternError::MissingCaptureGroup { required: 1, found: 0, .. }
        ));

        let err = PatternSet::new(&[], &[], &[(ConceptDelimiter::Colon, r"(\w+):")]).unwrap_err();
        assert!(matches!(
            err,
            PatternError::MissingCaptureGroup { required: 2, found: 1, .. }
        ));
    }

    #[test]
    fn custom_set_rejects_bad_regex() {
        let err = PatternSet::new(&[(QuestionStyle::Numbered, r"(unclosed")], &[], &[]).unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
    }

    #[test]
    fn concept_term_class_spans_lines() {
        let set = PatternSet::standard();
        let colon = &set.concepts()[0];
        let caps = colon.captures_at("Unit Two\nOsmosis: movement of water", 0).unwrap();
        assert_eq!(&caps[1], "Unit Two\nOsmosis");
    }

    #[test]
    fn custom_set_keeps_given_order() {
        let set = PatternSet::new(
            &[
                (QuestionStyle::Labeled, r"^Q:\s*(.+)$"),
                (QuestionStyle::Numbered, r"^(.+)\?$"),
            ],
            &[],
            &[],
        )
        .unwrap();
        assert_eq!(
            set.match_question("Q: Is this first?"),
            Some((QuestionStyle::Labeled, "Is this first?"))
        );
    }
}
