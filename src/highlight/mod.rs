// src/highlight/mod.rs

//! The host engine: compiles a `GrammarDescriptor` and classifies text.
//!
//! Compilation turns every pattern of the descriptor into a `Regex` once;
//! scanning (see `scanner`) is then a pure function of the input text.

mod scanner;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;

use crate::grammar::{Category, GrammarDescriptor, Rule};
use scanner::Scanner;

/// A classified slice of the input, as byte offsets.
/// `category` is `None` for plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub category: Option<Category>,
    pub range: Range<usize>,
}

impl Span {
    pub fn new(category: Option<Category>, range: Range<usize>) -> Self {
        Span { category, range }
    }

    /// The slice of `source` this span covers.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }

    pub fn is_plain(&self) -> bool {
        self.category.is_none()
    }
}

#[derive(Debug)]
enum CompiledRule {
    Region {
        category: Category,
        begin: Regex,
        end: Regex,
        illegal: Option<Regex>,
    },
    Pattern {
        category: Category,
        variants: Vec<Regex>,
    },
}

/// A grammar ready to scan text. Immutable; share it freely.
#[derive(Debug)]
pub struct Highlighter {
    name: String,
    rules: Vec<CompiledRule>,
    word_pattern: Regex,
    words: HashMap<String, Category>,
}

fn compile(pattern: &str, role: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid {} pattern {:?}", role, pattern))
}

impl Highlighter {
    /// Compiles `grammar`. Fails only if one of its patterns is not a valid
    /// regular expression, which cannot happen for the built-in presets.
    pub fn new(grammar: &GrammarDescriptor) -> Result<Self> {
        let mut rules = Vec::with_capacity(grammar.rules().len());
        for rule in grammar.rules() {
            let compiled = match rule {
                Rule::Region(region) => CompiledRule::Region {
                    category: region.category,
                    begin: compile(&region.begin, "region begin")?,
                    end: compile(&region.end, "region end")?,
                    illegal: region
                        .illegal
                        .as_deref()
                        .map(|p| compile(p, "region illegal"))
                        .transpose()?,
                },
                Rule::Pattern(pattern) => CompiledRule::Pattern {
                    category: pattern.category,
                    variants: pattern
                        .variants
                        .iter()
                        .map(|p| compile(p, "rule"))
                        .collect::<Result<_>>()?,
                },
            };
            rules.push(compiled);
        }

        let word_pattern = compile(grammar.keywords().pattern(), "keyword")?;
        let mut words = HashMap::new();
        for group in grammar.keywords().groups() {
            for word in &group.words {
                words.entry(word.clone()).or_insert(group.category);
            }
        }

        debug!(
            "compiled grammar {:?}: {} rules, {} keywords",
            grammar.name(),
            rules.len(),
            words.len()
        );
        Ok(Highlighter {
            name: grammar.name().to_string(),
            rules,
            word_pattern,
            words,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category of a standalone identifier, if it is a listed keyword or built-in.
    pub fn classify_word(&self, word: &str) -> Option<Category> {
        self.words.get(word).copied()
    }

    /// Splits `text` into spans that cover it completely and in order.
    /// Adjacent plain spans are merged.
    pub fn highlight(&self, text: &str) -> Vec<Span> {
        Scanner::new(self, text).run()
    }
}
