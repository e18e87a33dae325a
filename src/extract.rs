//! # Declaration Body Extraction
//!
//! Pulls the brace-delimited body of the first `enum` or `class` declaration
//! out of a C# source file, converts `//` comment markers to Lua's `--`,
//! and strips one level of leading indentation.
//!
//! The block is found with an explicit indentation scan rather than a
//! backreference regex (the `regex` crate supports neither backreferences
//! nor look-behind): locate the declaration line, take the indentation of
//! the following `{` line, and close at the last line sitting at exactly
//! that indentation with a `}`.
//!
//! A source file that contains no matching declaration yields `None`, never
//! an error. A missing file also yields `None` (with a warning), so one bad
//! descriptor cannot abort the rest of the run.

use std::fs;
use std::path::Path;

use log::warn;
use regex::Regex;

use crate::error::Result;

/// Which declaration keyword to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Enum,
    Class,
}

impl DeclKind {
    fn keyword(self) -> &'static str {
        match self {
            DeclKind::Enum => "enum",
            DeclKind::Class => "class",
        }
    }
}

/// Compiled helpers for body extraction, built once per run.
#[derive(Debug)]
pub struct BodyExtractor {
    enum_decl: Regex,
    class_decl: Regex,
    comment_run: Regex,
    indent_level: Regex,
}

impl BodyExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            enum_decl: Regex::new(r"enum \w+.*\n")?,
            class_decl: Regex::new(r"class \w+.*\n")?,
            // A run of two or more slashes collapses to one Lua marker, so
            // both `//` and XML-doc `///` become `--`.
            comment_run: Regex::new("//+")?,
            // One indentation level; the MonoGame Keys enum mixes tabs and
            // 4-space indents in the same file.
            indent_level: Regex::new(r"(?m)^(\t|    )")?,
        })
    }

    fn decl(&self, kind: DeclKind) -> &Regex {
        match kind {
            DeclKind::Enum => &self.enum_decl,
            DeclKind::Class => &self.class_decl,
        }
    }

    /// Extract the body of the first well-formed `kind` declaration.
    ///
    /// The returned text spans the opening `{` line through the closing `}`
    /// inclusive, with comment markers converted and one indentation level
    /// removed.
    pub fn extract_body(&self, source: &str, kind: DeclKind) -> Option<String> {
        for decl in self.decl(kind).find_iter(source) {
            if let Some(body) = brace_block(source, decl.end()) {
                let converted = self.comment_run.replace_all(body, "--");
                let unindented = self.indent_level.replace_all(&converted, "");
                return Some(unindented.into_owned());
            }
        }
        None
    }

    /// Read `path` and extract the first `kind` declaration body from it.
    ///
    /// A missing file is logged and skipped rather than failing the run;
    /// any other I/O fault propagates.
    pub fn load_decl_body(&self, path: &Path, kind: DeclKind) -> Result<Option<String>> {
        if !path.exists() {
            warn!(
                "Source file {} does not exist, skipping {}",
                path.display(),
                kind.keyword()
            );
            return Ok(None);
        }
        let source = fs::read_to_string(path)?;
        Ok(self.extract_body(&source, kind))
    }
}

/// Find the brace block starting at `from` (the byte just past the
/// declaration line).
///
/// Returns the slice from the start of the opening `{` line to the closing
/// `}` inclusive, or `None` when the block shape is not recognized.
fn brace_block(source: &str, from: usize) -> Option<&str> {
    let rest = &source[from..];

    // The opening brace sits on its own line; blank lines before it are
    // tolerated.
    let mut open_line_start = None;
    let mut indent = "";
    let mut after_open = 0;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            offset += line.len();
            continue;
        }
        if !trimmed.starts_with('{') {
            return None;
        }
        indent = &line[..line.len() - trimmed.len()];
        if indent.is_empty() {
            return None;
        }
        open_line_start = Some(offset);
        after_open = offset + line.len();
        break;
    }
    let open_line_start = open_line_start?;

    // The closing brace is the last line at exactly the opening
    // indentation. Deeper-nested braces carry more indentation and do not
    // qualify.
    let mut close_brace = None;
    let mut offset = after_open;
    for line in rest[after_open..].split_inclusive('\n') {
        if line.starts_with(indent) && line[indent.len()..].starts_with('}') {
            close_brace = Some(offset + indent.len());
        }
        offset += line.len();
    }

    close_brace.map(|pos| &rest[open_line_start..=pos])
}
