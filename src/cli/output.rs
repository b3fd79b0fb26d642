//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, PASS and FIXED
//! - Red: errors, FAIL
//! - Yellow: warnings
//! - Blue: MISSING
//! - Magenta: UNTRACKED
//! - Cyan: paths, commands, hints
//! - Dimmed: secondary info

use std::fmt::Display;

use console::{style, StyledObject};

use crate::core::reconcile::PairState;

const RULE_WIDTH: usize = 56;
const LABEL_WIDTH: usize = 10;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

fn paint<D>(value: D, f: impl FnOnce(StyledObject<D>) -> StyledObject<D>) -> String
where
    D: Display,
{
    if colors_enabled() {
        f(style(value)).force_styling(true).to_string()
    } else {
        style(value).force_styling(false).to_string()
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ pushed config.enc`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", |s| s.green()), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ .env: No such file or directory`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    println!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ run: envault audit --fix`
pub fn hint(msg: &str) {
    println!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", paint(title, |s| s.bold()));
}

/// Print an indented list item, colored by severity.
pub fn list_item(item: &str, is_error: bool) {
    if is_error {
        println!("          - {}", paint(item, |s| s.red()));
    } else {
        println!("          - {}", paint(item, |s| s.yellow()));
    }
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", paint("─".repeat(RULE_WIDTH), |s| s.dim()));
}

/// Format a path in cyan.
pub fn path(p: impl Display) -> String {
    paint(p.to_string(), |s| s.cyan())
}

/// Format a command in green.
pub fn cmd(c: &str) -> String {
    paint(c, |s| s.green())
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, |s| s.dim()));
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// Print a reconciliation line: padded state label, directory, optional note.
///
/// Example: `MISSING   api (found config.enc, needs pull)`
pub fn state(state: PairState, dir: &str, note: Option<&str>) {
    let label = format!("{:<width$}", state.label(), width = LABEL_WIDTH);
    let label = match state {
        PairState::Missing => paint(label, |s| s.blue()),
        PairState::Untracked => paint(label, |s| s.magenta()),
        PairState::Pass | PairState::Fixed => paint(label, |s| s.green()),
        PairState::Fail => paint(label, |s| s.red()),
    };

    match note {
        Some(note) => println!("{}{} {}", label, dir, paint(note, |s| s.dim())),
        None => println!("{}{}", label, dir),
    }
}
