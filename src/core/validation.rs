//! .env format validation.
//!
//! Inspects the textual structure of an environment file and, where every
//! problem has a deterministic correction, produces a fully fixed copy.
//! Pure text in, findings out: nothing here touches the filesystem.
//!
//! A double-quoted value may span lines and ends at its closing quote. Lines
//! inside it belong to the value and are copied through untouched. Single
//! quotes must close on the line that opens them.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Acceptable syntax, suspicious style.
    Warning,
    /// The file is invalid.
    Error,
}

/// A single finding. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingTrailingNewline,
    MissingSeparator { line: usize },
    EmptyKey { line: usize },
    InvalidKey { line: usize, key: String },
    UnterminatedQuote { line: usize, key: String },
    CrlfLineEndings,
    TrailingWhitespace { line: usize },
    SpacedSeparator { line: usize, key: String },
    DuplicateKey { line: usize, key: String, first: usize },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingTrailingNewline
            | Self::MissingSeparator { .. }
            | Self::EmptyKey { .. }
            | Self::InvalidKey { .. }
            | Self::UnterminatedQuote { .. } => Severity::Error,
            Self::CrlfLineEndings
            | Self::TrailingWhitespace { .. }
            | Self::SpacedSeparator { .. }
            | Self::DuplicateKey { .. } => Severity::Warning,
        }
    }

    /// Whether the issue has a deterministic, unambiguous correction.
    pub fn is_fixable(&self) -> bool {
        matches!(
            self,
            Self::MissingTrailingNewline
                | Self::CrlfLineEndings
                | Self::TrailingWhitespace { .. }
                | Self::SpacedSeparator { .. }
        )
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTrailingNewline => {
                write!(f, "File does not end with a newline character")
            }
            Self::MissingSeparator { line } => {
                write!(f, "Line {}: missing '=' in assignment", line)
            }
            Self::EmptyKey { line } => write!(f, "Line {}: empty variable name", line),
            Self::InvalidKey { line, key } => {
                write!(f, "Line {}: invalid variable name '{}'", line, key)
            }
            Self::UnterminatedQuote { line, key } => {
                write!(f, "Line {}: unterminated quote in value of '{}'", line, key)
            }
            Self::CrlfLineEndings => write!(f, "File uses CRLF line endings"),
            Self::TrailingWhitespace { line } => write!(f, "Line {}: trailing whitespace", line),
            Self::SpacedSeparator { line, key } => {
                write!(f, "Line {}: whitespace around '=' in '{}'", line, key)
            }
            Self::DuplicateKey { line, key, first } => write!(
                f,
                "Line {}: duplicate key '{}' (first defined on line {})",
                line, key, first
            ),
        }
    }
}

/// Outcome of validating one document.
///
/// Errors and warnings are independent: a valid document may still carry
/// warnings, so check [`Validation::is_clean`] before treating it as clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub issues: Vec<Issue>,
    /// Fully corrected document. Present only when every error is fixable
    /// and the fixes change the text.
    pub fixed: Option<String>,
}

impl Validation {
    /// No errors (warnings allowed).
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Error messages in detection order.
    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    /// Warning messages in detection order.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.issues
            .iter()
            .filter(|i| i.severity() == severity)
            .map(ToString::to_string)
            .collect()
    }
}

/// Validate the structure of an .env document.
pub fn validate(content: &str) -> Validation {
    if content.is_empty() {
        return Validation::default();
    }

    let mut issues = Vec::new();
    let mut fixed_lines = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut crlf = false;
    let mut open_quote: Option<(usize, String)> = None;

    let body = content.strip_suffix('\n').unwrap_or(content);

    for (idx, raw) in body.split('\n').enumerate() {
        let line_no = idx + 1;
        let line = match raw.strip_suffix('\r') {
            Some(stripped) => {
                crlf = true;
                stripped
            }
            None => raw,
        };

        if open_quote.is_some() {
            if closes_quote(line, '"') {
                open_quote = None;
            }
            fixed_lines.push(line.to_string());
            continue;
        }

        let trimmed = line.trim_end();
        if trimmed.len() != line.len() {
            issues.push(Issue::TrailingWhitespace { line: line_no });
        }

        let statement = trimmed.trim_start();
        let indent = &trimmed[..trimmed.len() - statement.len()];

        if statement.is_empty() || statement.starts_with('#') {
            fixed_lines.push(trimmed.to_string());
            continue;
        }

        let (export, assignment) = match statement.strip_prefix("export ") {
            Some(rest) => ("export ", rest),
            None => ("", statement),
        };

        let Some((raw_key, raw_value)) = assignment.split_once('=') else {
            issues.push(Issue::MissingSeparator { line: line_no });
            fixed_lines.push(trimmed.to_string());
            continue;
        };

        let key = raw_key.trim();
        if key.is_empty() {
            issues.push(Issue::EmptyKey { line: line_no });
            fixed_lines.push(trimmed.to_string());
            continue;
        }
        if !is_valid_name(key) {
            issues.push(Issue::InvalidKey {
                line: line_no,
                key: key.to_string(),
            });
            fixed_lines.push(trimmed.to_string());
            continue;
        }

        let value = raw_value.trim();
        let opens_block = is_unterminated(value) && value.starts_with('"');
        if opens_block {
            // Trailing whitespace here is part of the value.
            issues.retain(|i| *i != Issue::TrailingWhitespace { line: line_no });
            open_quote = Some((line_no, key.to_string()));
        } else if is_unterminated(value) {
            issues.push(Issue::UnterminatedQuote {
                line: line_no,
                key: key.to_string(),
            });
        }

        match seen.get(key) {
            Some(&first) => issues.push(Issue::DuplicateKey {
                line: line_no,
                key: key.to_string(),
                first,
            }),
            None => {
                seen.insert(key.to_string(), line_no);
            }
        }

        let spaced = raw_key.len() != raw_key.trim_end().len()
            || raw_value.starts_with(char::is_whitespace);
        if spaced {
            issues.push(Issue::SpacedSeparator {
                line: line_no,
                key: key.to_string(),
            });
            fixed_lines.push(format!(
                "{}{}{}={}",
                indent,
                export,
                raw_key.trim_end(),
                raw_value.trim_start()
            ));
        } else {
            fixed_lines.push(trimmed.to_string());
        }
        if opens_block {
            if let Some(last) = fixed_lines.last_mut() {
                last.push_str(&line[trimmed.len()..]);
            }
        }
    }

    if let Some((line, key)) = open_quote {
        issues.push(Issue::UnterminatedQuote { line, key });
    }
    if crlf {
        issues.insert(0, Issue::CrlfLineEndings);
    }
    if !content.ends_with('\n') {
        issues.push(Issue::MissingTrailingNewline);
    }

    let blocked = issues
        .iter()
        .any(|i| i.severity() == Severity::Error && !i.is_fixable());

    let fixed = if blocked {
        None
    } else {
        let mut candidate = fixed_lines.join("\n");
        candidate.push('\n');
        (candidate != content).then_some(candidate)
    };

    Validation { issues, fixed }
}

/// Environment variable names: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_valid_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A value that opens a quote without closing it on the same line.
fn is_unterminated(value: &str) -> bool {
    match value.chars().next() {
        Some(quote @ ('"' | '\'')) => !closes_quote(&value[1..], quote),
        _ => false,
    }
}

/// Whether `text` contains an unescaped `quote`. Backslash escapes apply to
/// double quotes only.
fn closes_quote(text: &str, quote: char) -> bool {
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' && quote == '"' {
            escaped = true;
            continue;
        }
        if ch == quote {
            return true;
        }
    }
    false
}
