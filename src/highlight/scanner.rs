// src/highlight/scanner.rs

//! The scanning loop.
//!
//! At every step the scanner looks for the rule whose begin pattern matches
//! earliest (ties go to the rule listed first). Text before that match is
//! split into words and looked up in the keyword table; the match itself is
//! emitted as its rule dictates.

use log::{debug, trace};
use regex::Regex;
use std::ops::Range;

use super::{CompiledRule, Highlighter, Span};
use crate::grammar::Category;

/// Where a rule's begin pattern next matches, remembered between steps.
#[derive(Debug, Clone)]
enum Lookahead {
    Unknown,
    At(Range<usize>),
    Exhausted,
}

pub(super) struct Scanner<'h, 't> {
    highlighter: &'h Highlighter,
    text: &'t str,
    cursor: usize,
    lookahead: Vec<Lookahead>,
    spans: Vec<Span>,
}

/// Next non-empty match of `re` starting at or after `from`.
/// Matching from inside `text` keeps look-behind context such as `\b`.
fn find_non_empty(re: &Regex, text: &str, from: usize) -> Option<Range<usize>> {
    let mut at = from;
    while at <= text.len() {
        let found = re.find_at(text, at)?;
        if !found.range().is_empty() {
            return Some(found.range());
        }
        // Step past the empty match by one whole character.
        at = found.end() + text[found.end()..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

impl<'h, 't> Scanner<'h, 't> {
    pub(super) fn new(highlighter: &'h Highlighter, text: &'t str) -> Self {
        Scanner {
            highlighter,
            text,
            cursor: 0,
            lookahead: vec![Lookahead::Unknown; highlighter.rules.len()],
            spans: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> Vec<Span> {
        while self.cursor < self.text.len() {
            match self.next_begin() {
                Some((index, begin)) => {
                    self.classify_words(self.cursor..begin.start);
                    self.cursor = begin.start;
                    self.apply(index, begin);
                }
                None => {
                    self.classify_words(self.cursor..self.text.len());
                    self.cursor = self.text.len();
                }
            }
        }
        self.spans
    }

    /// The earliest begin match among all rules; first rule wins a tie.
    fn next_begin(&mut self) -> Option<(usize, Range<usize>)> {
        let mut best: Option<(usize, Range<usize>)> = None;
        for index in 0..self.highlighter.rules.len() {
            let stale = match &self.lookahead[index] {
                Lookahead::Unknown => true,
                Lookahead::At(range) => range.start < self.cursor,
                Lookahead::Exhausted => false,
            };
            if stale {
                self.lookahead[index] = match self.begin_of(index) {
                    Some(range) => Lookahead::At(range),
                    None => Lookahead::Exhausted,
                };
            }
            if let Lookahead::At(range) = &self.lookahead[index] {
                let earlier = best.as_ref().map_or(true, |(_, b)| range.start < b.start);
                if earlier {
                    best = Some((index, range.clone()));
                }
            }
        }
        best
    }

    fn begin_of(&self, index: usize) -> Option<Range<usize>> {
        match &self.highlighter.rules[index] {
            CompiledRule::Region { begin, .. } => find_non_empty(begin, self.text, self.cursor),
            CompiledRule::Pattern { variants, .. } => {
                let mut best: Option<Range<usize>> = None;
                for variant in variants {
                    if let Some(found) = find_non_empty(variant, self.text, self.cursor) {
                        if best.as_ref().map_or(true, |b| found.start < b.start) {
                            best = Some(found);
                        }
                    }
                }
                best
            }
        }
    }

    fn apply(&mut self, index: usize, begin: Range<usize>) {
        let highlighter = self.highlighter;
        match &highlighter.rules[index] {
            CompiledRule::Pattern { category, .. } => {
                let category = *category;
                self.cursor = begin.end;
                self.push(Some(category), begin);
            }
            CompiledRule::Region {
                category,
                end,
                illegal,
                ..
            } => {
                let category = *category;
                let closing = find_non_empty(end, self.text, begin.end);
                // Only the region body can hold an illegal match.
                let violation = closing.as_ref().and_then(|closing| {
                    illegal
                        .as_ref()
                        .and_then(|re| re.find_at(&self.text[..closing.start], begin.end))
                        .map(|m| m.start())
                        .filter(|&at| at < closing.start)
                });
                match closing {
                    Some(closing) if violation.is_none() => {
                        self.cursor = closing.end;
                        self.push(Some(category), begin.start..closing.end);
                    }
                    _ => {
                        // The opener is left as plain text and scanning resumes after it.
                        debug!(
                            "rejected {} region at byte {} (illegal: {:?}, unterminated: {})",
                            category,
                            begin.start,
                            violation,
                            closing.is_none()
                        );
                        self.cursor = begin.end;
                        self.push(None, begin);
                    }
                }
            }
        }
    }

    /// Classifies the words inside `range`, which no rule claimed.
    fn classify_words(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let highlighter = self.highlighter;
        let text = self.text;
        let gap = &text[range.clone()];
        let mut last = range.start;
        for word in highlighter.word_pattern.find_iter(gap) {
            if word.range().is_empty() {
                continue;
            }
            let start = range.start + word.start();
            let end = range.start + word.end();
            self.push(None, last..start);
            let category = highlighter.classify_word(word.as_str());
            self.push(category, start..end);
            last = end;
        }
        self.push(None, last..range.end);
    }

    fn push(&mut self, category: Option<Category>, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        trace!("{:?} {:?} {:?}", category, range, &self.text[range.clone()]);
        if category.is_none() {
            if let Some(last) = self.spans.last_mut() {
                if last.category.is_none() && last.range.end == range.start {
                    last.range.end = range.end;
                    return;
                }
            }
        }
        self.spans.push(Span::new(category, range));
    }
}
