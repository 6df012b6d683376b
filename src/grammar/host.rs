// src/grammar/host.rs

//! Conversion between `GrammarDescriptor` and the JSON objects host
//! highlighting engines load.
//!
//! Two host versions are supported. They differ only in key names:
//!
//! | concept              | `Legacy`    | `Modern` |
//! |----------------------|-------------|----------|
//! | mode category key    | `className` | `scope`  |
//! | built-in word list   | `built_in`  | `type`   |
//! | single-pattern rule  | `begin`     | `match`  |
//!
//! Import accepts either shape (or a mix) and normalizes to the canonical
//! descriptor.

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use super::{Category, GrammarDescriptor, KeywordSet, PatternRule, RegionRule, Rule};

/// Key holding the keyword pattern inside the `keywords` object.
const KEYWORD_PATTERN_KEY: &str = "$pattern";
/// Word pattern hosts fall back to when a grammar declares none.
pub const DEFAULT_KEYWORD_PATTERN: &str = r"\w+";

/// Object shape expected by a host engine version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostShape {
    #[default]
    Legacy,
    Modern,
}

impl HostShape {
    fn class_key(&self) -> &'static str {
        match self {
            HostShape::Legacy => "className",
            HostShape::Modern => "scope",
        }
    }

    fn pattern_key(&self) -> &'static str {
        match self {
            HostShape::Legacy => "begin",
            HostShape::Modern => "match",
        }
    }

    /// Category label as this host spells it.
    pub fn label(&self, category: Category) -> &'static str {
        match (self, category) {
            (HostShape::Modern, Category::BuiltIn) => "type",
            (_, category) => category.as_str(),
        }
    }
}

impl std::str::FromStr for HostShape {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "legacy" => Ok(HostShape::Legacy),
            "modern" => Ok(HostShape::Modern),
            other => bail!("unknown host shape {:?} (expected legacy or modern)", other),
        }
    }
}

/// Renders `grammar` as the object a host of the given shape registers.
pub fn to_host_value(grammar: &GrammarDescriptor, shape: HostShape) -> Value {
    let mut keywords = Map::new();
    for group in grammar.keywords().groups() {
        keywords.insert(shape.label(group.category).to_string(), json!(group.words));
    }
    keywords.insert(
        KEYWORD_PATTERN_KEY.to_string(),
        Value::String(grammar.keywords().pattern().to_string()),
    );

    let contains: Vec<Value> = grammar.rules().iter().map(|rule| mode_value(rule, shape)).collect();

    json!({
        "name": grammar.name(),
        "keywords": keywords,
        "contains": contains,
    })
}

/// `to_host_value` in the descriptor's own shape.
pub fn export(grammar: &GrammarDescriptor) -> Value {
    to_host_value(grammar, grammar.shape())
}

pub fn to_host_string(grammar: &GrammarDescriptor, shape: HostShape) -> Result<String> {
    serde_json::to_string_pretty(&to_host_value(grammar, shape)).context("Failed to serialize grammar")
}

fn mode_value(rule: &Rule, shape: HostShape) -> Value {
    let mut mode = Map::new();
    mode.insert(
        shape.class_key().to_string(),
        Value::String(shape.label(rule.category()).to_string()),
    );
    match rule {
        Rule::Region(region) => {
            let mut variant = Map::new();
            variant.insert("begin".to_string(), Value::String(region.begin.clone()));
            variant.insert("end".to_string(), Value::String(region.end.clone()));
            if let Some(illegal) = &region.illegal {
                variant.insert("illegal".to_string(), Value::String(illegal.clone()));
            }
            mode.insert("variants".to_string(), Value::Array(vec![Value::Object(variant)]));
        }
        Rule::Pattern(pattern) if pattern.variants.len() == 1 => {
            mode.insert(
                shape.pattern_key().to_string(),
                Value::String(pattern.variants[0].clone()),
            );
        }
        Rule::Pattern(pattern) => {
            let variants = pattern
                .variants
                .iter()
                .map(|p| {
                    let mut variant = Map::new();
                    variant.insert(shape.pattern_key().to_string(), Value::String(p.clone()));
                    Value::Object(variant)
                })
                .collect();
            mode.insert("variants".to_string(), Value::Array(variants));
        }
    }
    Value::Object(mode)
}

// --- Import ---

#[derive(Debug, Deserialize)]
struct HostGrammar {
    name: String,
    #[serde(default)]
    keywords: Option<HostKeywords>,
    #[serde(default)]
    contains: Vec<HostMode>,
}

#[derive(Debug, Deserialize)]
struct HostKeywords {
    #[serde(rename = "$pattern", default)]
    pattern: Option<String>,
    #[serde(flatten)]
    groups: BTreeMap<String, WordList>,
}

/// Hosts accept keyword lists as arrays or as one space-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordList {
    List(Vec<String>),
    Spaced(String),
}

impl WordList {
    fn words(&self) -> Vec<&str> {
        match self {
            WordList::List(words) => words.iter().map(String::as_str).collect(),
            WordList::Spaced(text) => text.split_whitespace().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HostMode {
    #[serde(rename = "className", alias = "scope", default)]
    class_name: Option<String>,
    #[serde(default)]
    begin: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    illegal: Option<String>,
    #[serde(rename = "match", default)]
    pattern: Option<String>,
    #[serde(default)]
    variants: Vec<HostMode>,
}

/// What a single mode (or variant) declares once inherited keys are applied.
enum Declared {
    Region {
        begin: String,
        end: String,
        illegal: Option<String>,
    },
    Pattern(String),
}

impl HostMode {
    /// Variants inherit any key they leave unset from their parent mode.
    fn declared(&self, parent: Option<&HostMode>) -> Result<Declared> {
        let matched = inherited(&self.pattern, parent.map(|p| &p.pattern));
        let begin = inherited(&self.begin, parent.map(|p| &p.begin));
        let end = inherited(&self.end, parent.map(|p| &p.end));
        let illegal = inherited(&self.illegal, parent.map(|p| &p.illegal));
        match (matched, begin, end) {
            (Some(pattern), _, _) => Ok(Declared::Pattern(pattern)),
            (None, Some(begin), Some(end)) => Ok(Declared::Region { begin, end, illegal }),
            (None, Some(begin), None) => Ok(Declared::Pattern(begin)),
            (None, None, _) => bail!("mode declares no begin, match or variants"),
        }
    }

    fn category(&self) -> Result<Category> {
        let label = self
            .class_name
            .as_deref()
            .context("mode has neither className nor scope")?;
        Category::from_label(label).with_context(|| format!("unsupported mode category {:?}", label))
    }

    fn to_rules(&self) -> Result<Vec<Rule>> {
        let category = self.category()?;
        let declared = if self.variants.is_empty() {
            vec![self.declared(None)?]
        } else {
            self.variants
                .iter()
                .map(|variant| variant.declared(Some(self)))
                .collect::<Result<Vec<_>>>()?
        };

        // Regions stay separate rules; pattern variants collapse into one
        // rule placed where the first of them appeared.
        let mut rules = Vec::new();
        let mut pattern_slot: Option<usize> = None;
        for item in declared {
            match item {
                Declared::Region { begin, end, illegal } => rules.push(Rule::Region(RegionRule {
                    category,
                    begin,
                    end,
                    illegal,
                })),
                Declared::Pattern(pattern) => match pattern_slot {
                    Some(slot) => {
                        if let Rule::Pattern(existing) = &mut rules[slot] {
                            existing.variants.push(pattern);
                        }
                    }
                    None => {
                        pattern_slot = Some(rules.len());
                        rules.push(Rule::Pattern(PatternRule::single(category, pattern)));
                    }
                },
            }
        }
        Ok(rules)
    }
}

fn inherited(own: &Option<String>, parent: Option<&Option<String>>) -> Option<String> {
    own.clone().or_else(|| parent.and_then(|p| p.clone()))
}

/// Guesses which host shape a grammar object was written for.
fn detect_shape(value: &Value) -> HostShape {
    let alias_key = value.pointer("/keywords/type").is_some();
    let scoped = value
        .get("contains")
        .and_then(Value::as_array)
        .map_or(false, |modes| {
            modes.iter().any(|m| m.get("scope").is_some() || m.get("match").is_some())
        });
    if alias_key || scoped {
        HostShape::Modern
    } else {
        HostShape::Legacy
    }
}

/// Normalizes a host grammar object of either shape into a descriptor.
pub fn from_host_value(value: &Value) -> Result<GrammarDescriptor> {
    let shape = detect_shape(value);
    let host = HostGrammar::deserialize(value).context("Malformed host grammar object")?;

    let mut keywords = match &host.keywords {
        Some(table) => KeywordSet::new(
            table
                .pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_KEYWORD_PATTERN.to_string()),
        ),
        None => KeywordSet::new(DEFAULT_KEYWORD_PATTERN),
    };
    if let Some(table) = &host.keywords {
        for label in table.groups.keys() {
            if Category::from_label(label).is_none() {
                warn!("ignoring keyword category {:?} in grammar {:?}", label, host.name);
            }
        }
        // Fixed category order keeps word precedence independent of key order.
        for category in Category::ALL {
            for (label, list) in &table.groups {
                if Category::from_label(label) == Some(category) {
                    keywords = keywords.with_group(category, list.words().as_slice());
                }
            }
        }
    }

    let mut rules = Vec::new();
    for (index, mode) in host.contains.iter().enumerate() {
        let mode_rules = mode
            .to_rules()
            .with_context(|| format!("Invalid mode #{} in grammar {:?}", index, host.name))?;
        rules.extend(mode_rules);
    }

    debug!(
        "imported grammar {:?} ({:?} shape, {} rules)",
        host.name,
        shape,
        rules.len()
    );
    Ok(GrammarDescriptor::new(host.name, keywords, rules, shape))
}

pub fn from_host_str(text: &str) -> Result<GrammarDescriptor> {
    let value: Value = serde_json::from_str(text).context("Host grammar is not valid JSON")?;
    from_host_value(&value)
}
