// src/grammar/modes.rs

//! Base rules a host library hands to the grammars it loads.

use once_cell::sync::Lazy;

use super::{Category, PatternRule, Rule};

// Word boundaries are ASCII-only, as in the host engine: `é5` still has a
// number in it.

/// Hexadecimal literal with optional sign, `0x1F`, `-0x1F`.
pub const HEX_NUMBER_RE: &str = r"-?(?-u:\b)0[xX][a-fA-F0-9]+";
/// Decimal literal with optional sign, fraction and exponent, `12`, `-4.5`, `.5`, `1e9`.
pub const C_NUMBER_RE: &str = r"-?((?-u:\b)[0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][-+]?[0-9]+)?";
/// Plain decimal literal, `12` or `4.5`, and nothing glued to either end.
pub const DECIMAL_NUMBER_RE: &str = r"(?-u:\b)[0-9]+(\.[0-9]+)?(?-u:\b)";

/// The canonical number rule: hexadecimal first, then C-style decimals.
pub static C_NUMBER_MODE: Lazy<Rule> = Lazy::new(|| {
    Rule::Pattern(PatternRule {
        category: Category::Number,
        variants: vec![HEX_NUMBER_RE.to_string(), C_NUMBER_RE.to_string()],
    })
});

pub fn decimal_number_mode() -> Rule {
    Rule::Pattern(PatternRule::single(Category::Number, DECIMAL_NUMBER_RE))
}
