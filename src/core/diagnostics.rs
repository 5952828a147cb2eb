// src/core/diagnostics.rs

use crate::models::{OutputLine, StructuredDiagnostic, TaskCategory, TaskPriority};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;

lazy_static! {
    // file(line,col): error code: message — the code token may be empty.
    static ref DIAGNOSTIC_RE: Regex =
        Regex::new(r"(.+)\((\d+),(\d+)\): error\s*(.*)\s*:\s*(.+)").unwrap();
}

/// Classifies one raw output line.
///
/// Classification is a pure function of the line content. A grammar match
/// anywhere in the text promotes the line to a structured diagnostic
/// (leftmost match only); everything else passes through as plain text.
/// Both variants carry the raw line with exactly one trailing newline, so
/// sinks never lose output to classification.
pub fn classify(line: &str) -> OutputLine {
    let text = format!("{}\n", line);
    if let Some(caps) = DIAGNOSTIC_RE.captures(line) {
        let file = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let one_based = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
        let message = caps.get(5).map(|m| m.as_str()).unwrap_or_default();
        // A digit run that overflows u32 is not a line number; the line
        // stays plain.
        if let Some(one_based) = one_based {
            let item = StructuredDiagnostic {
                file: PathBuf::from(file),
                line: one_based.saturating_sub(1),
                error_text: message.to_string(),
                priority: TaskPriority::High,
                category: TaskCategory::BuildCompile,
            };
            return OutputLine::Diagnostic { text, item };
        }
    }
    OutputLine::Plain(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_compiler_shaped_line_is_promoted() {
        let line = r"C:\src\a.cpp(42,7): error Q001: missing semicolon";
        match classify(line) {
            OutputLine::Diagnostic { text, item } => {
                assert_eq!(text, format!("{}\n", line));
                assert_eq!(item.file, PathBuf::from(r"C:\src\a.cpp"));
                assert_eq!(item.line, 41);
                assert_eq!(item.error_text, "missing semicolon");
                assert_eq!(item.priority, TaskPriority::High);
                assert_eq!(item.category, TaskCategory::BuildCompile);
            }
            OutputLine::Plain(_) => panic!("expected a diagnostic"),
        }
    }

    #[test]
    fn an_ordinary_line_passes_through_newline_terminated() {
        assert_eq!(
            classify("Building target..."),
            OutputLine::Plain("Building target...\n".to_string())
        );
    }

    #[test]
    fn the_code_token_may_be_empty() {
        match classify("src/lib.rs(1,1): error : unexpected token") {
            OutputLine::Diagnostic { item, .. } => {
                assert_eq!(item.line, 0);
                assert_eq!(item.error_text, "unexpected token");
            }
            OutputLine::Plain(_) => panic!("expected a diagnostic"),
        }
    }

    #[test]
    fn line_numbers_convert_from_one_based_without_underflow() {
        match classify("weird.c(0,0): error X: reported at line zero") {
            OutputLine::Diagnostic { item, .. } => assert_eq!(item.line, 0),
            OutputLine::Plain(_) => panic!("expected a diagnostic"),
        }
    }

    #[test]
    fn an_overflowing_line_number_stays_plain() {
        let line = "a.c(99999999999999999999,1): error X: huge";
        assert!(matches!(classify(line), OutputLine::Plain(_)));
    }

    #[test]
    fn near_misses_stay_plain() {
        for line in [
            "a.cpp(42): error X: missing column",
            "a.cpp(42,7): warning X: not an error",
            "(42,7): error X: empty file path",
        ] {
            assert!(matches!(classify(line), OutputLine::Plain(_)), "{}", line);
        }
    }

    #[test]
    fn classification_of_plain_text_is_idempotent() {
        let OutputLine::Plain(text) = classify("Building target...") else {
            panic!("expected plain");
        };
        assert!(matches!(classify(&text), OutputLine::Plain(_)));
    }
}
