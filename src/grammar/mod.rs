// src/grammar/mod.rs

//! The Alakon grammar descriptor.
//!
//! A `GrammarDescriptor` is plain data: a language name, a keyword table and
//! an ordered list of token rules. It does no scanning of its own; the engine
//! in `crate::highlight` (or any other host) drives it.
//!
//! Both shapes the descriptor historically shipped in are produced by the one
//! construction function, `alakon`, from a `GrammarOptions` value.

pub mod host;
pub mod modes;


use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use host::HostShape;

pub const LANGUAGE_NAME: &str = "Alakon";

/// What counts as a word for keyword lookup.
pub const IDENTIFIER_PATTERN: &str = "[A-Za-z][A-Za-z0-9_]*";

pub const BASIC_KEYWORDS: &[&str] = &["true", "false"];
pub const CONTROL_KEYWORDS: &[&str] = &["if", "else", "while"];
pub const BUILT_IN_TYPES: &[&str] = &["String", "bool", "num"];

/// Label assigned to a classified span of source text.
///
/// The serialized names are the host engine's class names; the built-in
/// category is also accepted under its short alias `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    String,
    Number,
    Keyword,
    #[serde(alias = "type")]
    BuiltIn,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::String,
        Category::Number,
        Category::Keyword,
        Category::BuiltIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Category::String => "string",
            Category::Number => "number",
            Category::Keyword => "keyword",
            Category::BuiltIn => "built_in",
        }
    }

    /// Resolves a host class name, accepting the `type` alias.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "string" => Some(Category::String),
            "number" => Some(Category::Number),
            "keyword" => Some(Category::Keyword),
            "built_in" | "type" => Some(Category::BuiltIn),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Words that classify as one category, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub category: Category,
    pub words: Vec<String>,
}

/// The keyword table: categorized word lists plus the pattern that splits
/// plain text into candidate words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    pattern: String,
    groups: Vec<KeywordGroup>,
}

impl KeywordSet {
    pub fn new(pattern: impl Into<String>) -> Self {
        KeywordSet {
            pattern: pattern.into(),
            groups: Vec::new(),
        }
    }

    /// Appends `words` to the group for `category`, creating the group if needed.
    pub fn with_group<S: AsRef<str>>(mut self, category: Category, words: &[S]) -> Self {
        let words = words.iter().map(|w| w.as_ref().to_string());
        match self.groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.words.extend(words),
            None => self.groups.push(KeywordGroup {
                category,
                words: words.collect(),
            }),
        }
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    /// Words of one category, in declaration order.
    pub fn words(&self, category: Category) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .filter(move |g| g.category == category)
            .flat_map(|g| g.words.iter().map(String::as_str))
    }

    /// Category of `word`; when a word is listed twice the first group wins.
    pub fn category_of(&self, word: &str) -> Option<Category> {
        self.groups
            .iter()
            .find(|g| g.words.iter().any(|w| w == word))
            .map(|g| g.category)
    }
}

/// A span opened by `begin` and closed by `end`. If `illegal` matches
/// between the two, the region does not match at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRule {
    pub category: Category,
    pub begin: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illegal: Option<String>,
}

/// A span matched directly by one of several alternative patterns.
/// Earlier variants win when two match at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub category: Category,
    pub variants: Vec<String>,
}

impl PatternRule {
    pub fn single(category: Category, pattern: impl Into<String>) -> Self {
        PatternRule {
            category,
            variants: vec![pattern.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Region(RegionRule),
    Pattern(PatternRule),
}

impl Rule {
    pub fn category(&self) -> Category {
        match self {
            Rule::Region(region) => region.category,
            Rule::Pattern(pattern) => pattern.category,
        }
    }
}

/// How the number rule is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberForm {
    /// The host base library's number mode, with its variants.
    #[default]
    BaseMode,
    /// A single fixed decimal pattern.
    SinglePattern,
}

/// Named option sets matching the two shipped tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Classic,
    Extended,
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Preset::Classic),
            "extended" => Ok(Preset::Extended),
            other => anyhow::bail!("unknown grammar preset {:?} (expected classic or extended)", other),
        }
    }
}

/// Inputs to `alakon`: the keyword lists and the rule variants to declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarOptions {
    pub keywords: Vec<String>,
    pub built_ins: Vec<String>,
    pub number: NumberForm,
    pub shape: HostShape,
}

impl GrammarOptions {
    /// `true`/`false` keywords, base-mode numbers, `built_in` key.
    pub fn classic() -> Self {
        GrammarOptions {
            keywords: to_strings(BASIC_KEYWORDS),
            built_ins: to_strings(BUILT_IN_TYPES),
            number: NumberForm::BaseMode,
            shape: HostShape::Legacy,
        }
    }

    /// Adds `if`/`else`/`while`, a single number pattern, and the `type` key.
    pub fn extended() -> Self {
        let mut keywords = to_strings(BASIC_KEYWORDS);
        keywords.extend(to_strings(CONTROL_KEYWORDS));
        GrammarOptions {
            keywords,
            built_ins: to_strings(BUILT_IN_TYPES),
            number: NumberForm::SinglePattern,
            shape: HostShape::Modern,
        }
    }
}

impl Default for GrammarOptions {
    fn default() -> Self {
        GrammarOptions::classic()
    }
}

impl From<Preset> for GrammarOptions {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Classic => GrammarOptions::classic(),
            Preset::Extended => GrammarOptions::extended(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Everything a host engine needs to highlight Alakon.
/// Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarDescriptor {
    name: String,
    keywords: KeywordSet,
    rules: Vec<Rule>,
    #[serde(default)]
    shape: HostShape,
}

impl GrammarDescriptor {
    pub fn new(name: impl Into<String>, keywords: KeywordSet, rules: Vec<Rule>, shape: HostShape) -> Self {
        GrammarDescriptor {
            name: name.into(),
            keywords,
            rules,
            shape,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Rules in precedence order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The host object shape this descriptor exports to by default.
    pub fn shape(&self) -> HostShape {
        self.shape
    }
}

impl Default for GrammarDescriptor {
    fn default() -> Self {
        alakon(&GrammarOptions::classic())
    }
}

/// The Alakon string literal: double quoted, never spanning a line break.
pub fn string_rule() -> Rule {
    Rule::Region(RegionRule {
        category: Category::String,
        begin: "\"".to_string(),
        end: "\"".to_string(),
        illegal: Some("\\n".to_string()),
    })
}

/// Builds the Alakon grammar descriptor.
///
/// Identifiers other than the listed keywords and built-ins are left
/// unclassified: a catch-all identifier rule would swallow the keywords.
pub fn alakon(options: &GrammarOptions) -> GrammarDescriptor {
    let keywords = KeywordSet::new(IDENTIFIER_PATTERN)
        .with_group(Category::Keyword, options.keywords.as_slice())
        .with_group(Category::BuiltIn, options.built_ins.as_slice());
    let number = match options.number {
        NumberForm::BaseMode => modes::C_NUMBER_MODE.clone(),
        NumberForm::SinglePattern => modes::decimal_number_mode(),
    };
    GrammarDescriptor::new(LANGUAGE_NAME, keywords, vec![string_rule(), number], options.shape)
}
