// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content moderation check: abuse blocklist plus structural spam heuristics

use crate::safety::check::{CheckInput, CheckOutcome, SafetyCheck};
use crate::safety::rules::MODERATION_BLOCKLIST;
use crate::safety::types::{FlagKind, SafetyFlag, SafetyLevel, SessionContext};

const MIN_CHAR_RUN: usize = 11;
const MIN_CAPS_RUN: usize = 20;
const MAX_SPAM_PATTERN_LEN: usize = 10;
const MIN_PATTERN_REPEATS: usize = 6;

pub struct ContentModerationCheck {
    custom_blocked_terms: Vec<String>,
    spam_heuristics_enabled: bool,
}

impl ContentModerationCheck {
    pub fn new() -> Self {
        Self {
            custom_blocked_terms: Vec::new(),
            spam_heuristics_enabled: true,
        }
    }

    /// Additional lowercase terms blocked on top of the static blocklist
    pub fn with_custom_terms(mut self, terms: Vec<String>) -> Self {
        self.custom_blocked_terms = terms
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn with_spam_heuristics(mut self, enabled: bool) -> Self {
        self.spam_heuristics_enabled = enabled;
        self
    }

    fn blocked_term(&self, normalized: &str) -> Option<String> {
        MODERATION_BLOCKLIST
            .iter()
            .find(|term| normalized.contains(*term))
            .map(|term| term.to_string())
            .or_else(|| {
                self.custom_blocked_terms
                    .iter()
                    .find(|term| normalized.contains(term.as_str()))
                    .cloned()
            })
    }

    fn looks_like_spam(&self, raw: &str) -> bool {
        has_char_run(raw, MIN_CHAR_RUN)
            || has_caps_run(raw, MIN_CAPS_RUN)
            || has_repeated_pattern(raw, MAX_SPAM_PATTERN_LEN, MIN_PATTERN_REPEATS)
    }
}

impl Default for ContentModerationCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyCheck for ContentModerationCheck {
    fn name(&self) -> &'static str {
        "content_moderation"
    }

    fn evaluate(&self, input: &CheckInput, _context: &SessionContext) -> CheckOutcome {
        let mut flags = Vec::new();

        if self.blocked_term(&input.normalized).is_some() {
            flags.push(SafetyFlag::new(
                SafetyLevel::Blocked,
                FlagKind::ContentViolation,
                "Questo contenuto viola le linee guida della community. Se sospetti un caso \
                 di maltrattamento di animali, contatta le autorità competenti.",
            ));
        }

        if self.spam_heuristics_enabled && self.looks_like_spam(&input.raw) {
            flags.push(SafetyFlag::new(
                SafetyLevel::Warning,
                FlagKind::ContentViolation,
                "Il messaggio sembra contenere testo ripetuto. Riformula la domanda in modo \
                 più chiaro per ricevere una risposta utile.",
            ));
        }

        CheckOutcome {
            flags,
            protocol: None,
        }
    }
}

/// A single character repeated at least `min_run` times consecutively
fn has_char_run(text: &str, min_run: usize) -> bool {
    let mut run = 0usize;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if Some(ch) == prev {
            run += 1;
        } else {
            run = 1;
            prev = Some(ch);
        }
        if run >= min_run {
            return true;
        }
    }
    false
}

/// At least `min_caps` consecutive uppercase letters, allowing spaces inside
/// the run
fn has_caps_run(text: &str, min_caps: usize) -> bool {
    let mut caps = 0usize;
    for ch in text.chars() {
        if ch.is_uppercase() {
            caps += 1;
            if caps >= min_caps {
                return true;
            }
        } else if ch != ' ' {
            caps = 0;
        }
    }
    false
}

/// A pattern of 2..=`max_len` characters repeated at least `min_repeats`
/// times back to back. Single-character runs are covered by `has_char_run`.
fn has_repeated_pattern(text: &str, max_len: usize, min_repeats: usize) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    for len in 2..=max_len {
        if len * min_repeats > n {
            break;
        }
        for start in 0..=(n - len * min_repeats) {
            let pattern = &chars[start..start + len];
            let mut repeats = 1;
            let mut pos = start + len;
            while pos + len <= n && &chars[pos..pos + len] == pattern {
                repeats += 1;
                if repeats >= min_repeats {
                    return true;
                }
                pos += len;
            }
        }
    }
    false
}
