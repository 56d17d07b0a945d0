//! Term/definition scanner over the whole text.
//!
//! Each delimiter pattern is run independently over the full text, so one
//! sentence can be reported by more than one delimiter. Results are not
//! deduplicated.

use super::patterns::{ConceptDelimiter, PatternSet, TaggedPattern};
use super::types::Concept;
use crate::config::ParserConfig;

pub fn extract_concepts(patterns: &PatternSet, config: &ParserConfig, text: &str) -> Vec<Concept> {
    let mut concepts = Vec::new();

    for pattern in patterns.concepts() {
        let before = concepts.len();
        scan_delimiter(pattern, config, text, &mut concepts);
        tracing::trace!(
            delimiter = ?pattern.tag,
            found = concepts.len() - before,
            "Definition pass complete"
        );
    }

    concepts
}

/// Non-overlapping left-to-right scan for one delimiter convention.
fn scan_delimiter(
    pattern: &TaggedPattern<ConceptDelimiter>,
    config: &ParserConfig,
    text: &str,
    out: &mut Vec<Concept>,
) {
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = pattern.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(term), Some(definition)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };

        if !definition_closes(text, whole.end()) {
            // Retry from the next character, the match may start later
            pos = next_char(text, whole.start());
            continue;
        }
        pos = whole.end().max(next_char(text, whole.start()));

        let term = term.as_str().trim();
        let definition = definition.as_str().trim();
        if term.chars().count() >= config.min_term_chars
            && definition.chars().count() >= config.min_definition_chars
        {
            out.push(Concept {
                term: term.to_string(),
                definition: definition.to_string(),
            });
        }
    }
}

/// A definition runs to the end of its line and is accepted only when the
/// next line starts with a capital, starts a numbered item, is empty, or
/// there is no next line.
fn definition_closes(text: &str, end: usize) -> bool {
    let rest = &text[end..];
    let Some(next) = rest.strip_prefix('\n') else {
        return rest.is_empty();
    };

    next.is_empty()
        || next.starts_with('\n')
        || next.starts_with(|c: char| c.is_ascii_uppercase())
        || starts_numbered(next)
}

fn starts_numbered(line: &str) -> bool {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && line.as_bytes().get(digits) == Some(&b'.')
}

fn next_char(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}
