//! Line scanner for questions and the answers listed beneath them.

use super::patterns::PatternSet;
use super::types::{Line, Question};
use crate::config::ParserConfig;

/// Walk every line once and record each question whose payload is long
/// enough, together with the answers found in its lookahead window.
pub fn extract_questions(
    patterns: &PatternSet,
    config: &ParserConfig,
    lines: &[Line<'_>],
) -> Vec<Question> {
    let mut questions = Vec::new();

    for line in lines {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }

        let Some((style, payload)) = patterns.match_question(text) else {
            continue;
        };

        let question_text = payload.trim();
        if question_text.chars().count() < config.min_question_chars {
            tracing::trace!(line = line.index + 1, ?style, "Question text too short, skipped");
            continue;
        }

        let answers = find_answers(patterns, config, lines, line.index);
        tracing::debug!(
            line = line.index + 1,
            ?style,
            answers = answers.len(),
            "Question found"
        );

        questions.push(Question {
            text: question_text.to_string(),
            source_line: line.index + 1,
            answers,
        });
    }

    questions
}

/// Collect answers from the lines after `question_index`.
///
/// At most `answer_lookahead` lines are inspected. A line that matches an
/// answer pattern is consumed as an answer (kept only if long enough); any
/// other line matching a question pattern closes the window early.
pub fn find_answers(
    patterns: &PatternSet,
    config: &ParserConfig,
    lines: &[Line<'_>],
    question_index: usize,
) -> Vec<String> {
    let start = question_index.saturating_add(1);
    let end = start
        .saturating_add(config.answer_lookahead)
        .min(lines.len());

    let mut answers = Vec::new();

    for line in lines.get(start..end).unwrap_or_default() {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }

        if let Some((_, payload)) = patterns.match_answer(text) {
            let answer = payload.trim();
            if answer.chars().count() >= config.min_answer_chars {
                answers.push(answer.to_string());
            }
            continue;
        }

        if patterns.is_question(text) {
            break;
        }
    }

    answers
}
