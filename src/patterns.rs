//! # C# Pattern Library
//!
//! The small set of regular expressions describing the textual shape of a
//! C# member declaration, method signature, and parameter. These are
//! deliberately permissive patterns over a known formatting convention
//! (4-space or tab indentation, opening braces on their own line), not a
//! grammar: anything the convention doesn't cover is an accepted extraction
//! miss, and false positives inside method bodies are tolerated.
//!
//! Everything is compiled once into an immutable [`Patterns`] value and
//! passed explicitly to the extraction code.
//!
//! Declarations annotated with `[MoonSharpVisible(false)]` are hidden from
//! the embedded scripting runtime and must never appear in the generated
//! stubs. The `regex` crate has no look-behind, so instead of guarding the
//! patterns themselves, each match is checked against the line preceding it.

use regex::Regex;

use crate::error::Result;

const LINE_START: &str = "^ +";
const VISIBILITY: &str = r"(?:(?P<visibility>public|private) )?";
const STATIC: &str = r"(?:(?P<static>static) )?";
// Permits array brackets, generic angle brackets, and the commas/spaces
// inside generic argument lists.
const TYPE: &str = r"(?P<type>[\w\[\]<>, ]+)";
const NAME: &str = r"(?P<name>\w+)";

/// The annotation hiding a declaration from the scripting runtime.
const HIDDEN_ANNOTATION: &str = "[MoonSharpVisible(false)]";

/// A matched class member (in practice an auto-property, matched by its
/// trailing `{` accessor block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub visibility: Option<String>,
    pub is_static: bool,
    pub cs_type: String,
    pub name: String,
}

/// A matched method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMatch {
    pub visibility: Option<String>,
    pub is_static: bool,
    pub return_type: String,
    pub name: String,
    /// The raw text between the signature's parentheses, re-scanned with
    /// [`Patterns::parameters`].
    pub params: String,
}

/// A single matched parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMatch {
    pub by_ref: bool,
    pub cs_type: String,
    pub name: String,
}

/// The compiled pattern set.
#[derive(Debug)]
pub struct Patterns {
    field: Regex,
    function: Regex,
    parameter: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            field: Regex::new(&format!(
                r"(?m){LINE_START}{VISIBILITY}{STATIC}{TYPE} {NAME} \{{"
            ))?,
            function: Regex::new(&format!(
                r"(?m){LINE_START}{VISIBILITY}{STATIC}{TYPE} {NAME}\((?P<params>.*?)\)"
            ))?,
            parameter: Regex::new(&format!(r"(?:(?P<ref>ref) )?{TYPE} {NAME}"))?,
        })
    }

    /// All visible field declarations in a class body.
    pub fn fields(&self, body: &str) -> Vec<FieldMatch> {
        self.field
            .captures_iter(body)
            .filter(|caps| {
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                !hidden_from_scripting(body, start)
            })
            .map(|caps| FieldMatch {
                visibility: caps.name("visibility").map(|m| m.as_str().to_string()),
                is_static: caps.name("static").is_some(),
                cs_type: caps["type"].to_string(),
                name: caps["name"].to_string(),
            })
            .collect()
    }

    /// All visible method signatures in a class body.
    pub fn functions(&self, body: &str) -> Vec<FunctionMatch> {
        self.function
            .captures_iter(body)
            .filter(|caps| {
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                !hidden_from_scripting(body, start)
            })
            .map(|caps| FunctionMatch {
                visibility: caps.name("visibility").map(|m| m.as_str().to_string()),
                is_static: caps.name("static").is_some(),
                return_type: caps["type"].to_string(),
                name: caps["name"].to_string(),
                params: caps["params"].to_string(),
            })
            .collect()
    }

    /// Parameters of a captured parameter-list text.
    ///
    /// The list is split on top-level commas before the parameter pattern is
    /// applied, so commas inside generic argument lists stay part of the
    /// type token while `int x, ref string s` still yields two parameters.
    pub fn parameters(&self, params: &str) -> Vec<ParamMatch> {
        split_top_level(params)
            .filter_map(|segment| {
                // The type token admits spaces, so the whitespace after a
                // comma must not be left for it to swallow.
                let caps = self.parameter.captures(segment.trim())?;
                Some(ParamMatch {
                    by_ref: caps.name("ref").is_some(),
                    cs_type: caps["type"].to_string(),
                    name: caps["name"].to_string(),
                })
            })
            .collect()
    }
}

/// True when the line immediately preceding `start` carries the
/// hide-from-scripting annotation.
fn hidden_from_scripting(body: &str, start: usize) -> bool {
    let before = &body[..start];
    let Some(line_break) = before.rfind('\n') else {
        return false;
    };
    let previous_line = match before[..line_break].rfind('\n') {
        Some(i) => &before[i + 1..line_break],
        None => &before[..line_break],
    };
    previous_line.trim_end().ends_with(HIDDEN_ANNOTATION)
}

/// Split on commas that are not inside angle brackets.
fn split_top_level(params: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0i32;
    let mut segment_start = 0;
    let mut segments = Vec::new();
    for (i, c) in params.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                segments.push(&params[segment_start..i]);
                segment_start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&params[segment_start..]);
    segments.into_iter()
}
