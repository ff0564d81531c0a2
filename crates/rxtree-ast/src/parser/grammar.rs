// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! PEG grammar for ECMAScript-style pattern bodies.
//!
//! Ordered choice matters in a few places:
//! - assertions are tried before atoms, so `\b` is never an escape there;
//! - `\k<name>` and `\N` are tried before other escapes;
//! - a class range is tried before a single class character;
//! - `{` and `]` that do not form syntax fall back to literals.

use peg::error::ParseError;
use peg::str::LineCol;

use super::inflate::Deflated;
use crate::nodes::{AssertionKind, CharKind, NodeKind, Quantifier, QuantifierKind, Reference};

/// Parse a pattern body (no delimiters, no flags).
pub(crate) fn parse_body(body: &str) -> Result<Deflated, ParseError<LineCol>> {
    pattern_grammar::pattern(body)
}

fn assertion(
    kind: AssertionKind,
    negative: bool,
    body: Option<Deflated>,
    start: usize,
    end: usize,
) -> Deflated {
    Deflated::scalar(NodeKind::Assertion { kind, negative }, body, start, end)
}

fn group(capturing: bool, name: Option<&str>, body: Deflated, start: usize, end: usize) -> Deflated {
    Deflated::scalar(
        NodeKind::Group {
            capturing,
            name: name.map(str::to_string),
            number: None,
        },
        Some(body),
        start,
        end,
    )
}

fn class_range(from: &Deflated, to: &Deflated, start: usize, end: usize) -> Option<Deflated> {
    match (from.as_char(), to.as_char()) {
        (Some((from, from_kind)), Some((to, to_kind)))
            if from_kind != CharKind::Meta && to_kind != CharKind::Meta =>
        {
            Some(Deflated::leaf(
                NodeKind::ClassRange {
                    from: from.to_string(),
                    to: to.to_string(),
                },
                start,
                end,
            ))
        }
        _ => None,
    }
}

peg::parser! {
    grammar pattern_grammar() for str {
        pub rule pattern() -> Deflated
            = d:disjunction() { d }

        rule disjunction() -> Deflated
            = start:position!() first:alternative() rest:("|" a:alternative() { a })* end:position!() {
                if rest.is_empty() {
                    first
                } else {
                    let mut alternatives = Vec::with_capacity(rest.len() + 1);
                    alternatives.push(first);
                    alternatives.extend(rest);
                    Deflated::collection(NodeKind::Disjunction, alternatives, start, end)
                }
            }

        rule alternative() -> Deflated
            = start:position!() terms:term()* end:position!() {
                Deflated::collection(NodeKind::Alternative, terms, start, end)
            }

        rule term() -> Deflated
            = assertion()
            / start:position!() a:atom() q:quantifier()? end:position!() {
                match q {
                    Some(quantifier) => Deflated::scalar(
                        NodeKind::Repetition { quantifier },
                        Some(a),
                        start,
                        end,
                    ),
                    None => a,
                }
            }

        // --------------------------------------------------------------------
        // Assertions
        // --------------------------------------------------------------------

        rule assertion() -> Deflated
            = start:position!() "^" end:position!() {
                assertion(AssertionKind::Start, false, None, start, end)
            }
            / start:position!() "$" end:position!() {
                assertion(AssertionKind::End, false, None, start, end)
            }
            / start:position!() "\\b" end:position!() {
                assertion(AssertionKind::WordBoundary, false, None, start, end)
            }
            / start:position!() "\\B" end:position!() {
                assertion(AssertionKind::WordBoundary, true, None, start, end)
            }
            / start:position!() "(?=" d:disjunction() ")" end:position!() {
                assertion(AssertionKind::Lookahead, false, Some(d), start, end)
            }
            / start:position!() "(?!" d:disjunction() ")" end:position!() {
                assertion(AssertionKind::Lookahead, true, Some(d), start, end)
            }
            / start:position!() "(?<=" d:disjunction() ")" end:position!() {
                assertion(AssertionKind::Lookbehind, false, Some(d), start, end)
            }
            / start:position!() "(?<!" d:disjunction() ")" end:position!() {
                assertion(AssertionKind::Lookbehind, true, Some(d), start, end)
            }

        // --------------------------------------------------------------------
        // Quantifiers
        // --------------------------------------------------------------------

        rule quantifier() -> Quantifier
            = kind:quantifier_kind() lazy:"?"? {
                Quantifier { kind, greedy: lazy.is_none() }
            }

        rule quantifier_kind() -> QuantifierKind
            = "*" { QuantifierKind::ZeroOrMore }
            / "+" { QuantifierKind::OneOrMore }
            / "?" { QuantifierKind::ZeroOrOne }
            / "{" from:number() "," to:number() "}" {?
                if to < from {
                    Err("quantifier bounds in order")
                } else {
                    Ok(QuantifierKind::Range { from, to: Some(to) })
                }
            }
            / "{" from:number() "," "}" { QuantifierKind::Range { from, to: None } }
            / "{" count:number() "}" { QuantifierKind::Exact { count } }

        rule number() -> u32
            = digits:$(['0'..='9']+) {? digits.parse().or(Err("number")) }

        // --------------------------------------------------------------------
        // Atoms
        // --------------------------------------------------------------------

        rule atom() -> Deflated
            = start:position!() "." end:position!() {
                Deflated::char(".", CharKind::Meta, start, end)
            }
            / class()
            / group()
            / backreference()
            / char_escape()
            / start:position!() value:$(pattern_char()) end:position!() {
                Deflated::char(value, CharKind::Simple, start, end)
            }

        rule pattern_char()
            = !['^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | '|'] [_]

        rule group() -> Deflated
            = start:position!() "(?:" d:disjunction() ")" end:position!() {
                group(false, None, d, start, end)
            }
            / start:position!() "(?<" name:$(identifier()) ">" d:disjunction() ")" end:position!() {
                group(true, Some(name), d, start, end)
            }
            / start:position!() "(" !"?" d:disjunction() ")" end:position!() {
                group(true, None, d, start, end)
            }

        rule identifier()
            = ['a'..='z' | 'A'..='Z' | '_' | '$'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$']*

        rule backreference() -> Deflated
            = start:position!() "\\k<" name:$(identifier()) ">" end:position!() {
                Deflated::leaf(
                    NodeKind::Backreference { reference: Reference::Name(name.to_string()) },
                    start,
                    end,
                )
            }
            / start:position!() "\\" digits:$(['1'..='9'] ['0'..='9']*) end:position!() {?
                digits
                    .parse()
                    .map(|number| Deflated::leaf(
                        NodeKind::Backreference { reference: Reference::Number(number) },
                        start,
                        end,
                    ))
                    .or(Err("backreference number"))
            }

        rule char_escape() -> Deflated
            = start:position!() value:$("\\" ['d' | 'D' | 'w' | 'W' | 's' | 'S']) end:position!() {
                Deflated::char(value, CharKind::Meta, start, end)
            }
            / start:position!() value:$("\\c" ['a'..='z' | 'A'..='Z']) end:position!() {
                Deflated::char(value, CharKind::Control, start, end)
            }
            / start:position!() value:$("\\x" hex_digit() hex_digit()) end:position!() {
                Deflated::char(value, CharKind::Hex, start, end)
            }
            / start:position!() value:$("\\u{" hex_digit()+ "}") end:position!() {
                Deflated::char(value, CharKind::Unicode, start, end)
            }
            / start:position!() value:$("\\u" hex_digit() hex_digit() hex_digit() hex_digit()) end:position!() {
                Deflated::char(value, CharKind::Unicode, start, end)
            }
            / start:position!() value:$("\\0" !['0'..='9']) end:position!() {
                Deflated::char(value, CharKind::Octal, start, end)
            }
            / start:position!() value:$("\\" [_]) end:position!() {
                Deflated::char(value, CharKind::Escaped, start, end)
            }

        rule hex_digit()
            = ['0'..='9' | 'a'..='f' | 'A'..='F']

        // --------------------------------------------------------------------
        // Character classes
        // --------------------------------------------------------------------

        rule class() -> Deflated
            = start:position!() "[" negative:"^"? items:class_item()* "]" end:position!() {
                Deflated::collection(
                    NodeKind::CharacterClass { negative: negative.is_some() },
                    items,
                    start,
                    end,
                )
            }

        rule class_item() -> Deflated
            = start:position!() from:class_atom() "-" to:class_atom() end:position!() {?
                class_range(&from, &to, start, end).ok_or("class range")
            }
            / class_atom()

        rule class_atom() -> Deflated
            = char_escape()
            / start:position!() value:$(!['\\' | ']'] [_]) end:position!() {
                Deflated::char(value, CharKind::Simple, start, end)
            }
    }
}
