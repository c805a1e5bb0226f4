//! grep for JavaScript syntax trees.
//!
//! Takes an s-expression pattern and one or more ESTree JSON files (as
//! produced by esprima, acorn, or espree with location info). Matching nodes
//! print one line each. When a sibling `.js` file with the same stem exists,
//! the matched source line prints with the matched span highlighted;
//! otherwise the node itself prints as compact JSON.
//!
//! Exit codes follow grep: 0 when anything matched, 1 when nothing did, 2 on
//! pattern or input errors.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use serde_json::Value;
use stana_match::{walk, Matcher, Visit};

#[derive(Parser, Debug)]
#[command(name = "stanagrep", version)]
struct Cli {
    /// Pattern, e.g. '(call alert ?argument)'
    pattern: String,

    /// ESTree JSON files to search
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Do not prefix output lines with the file name
    #[arg(long)]
    no_filename: bool,

    /// Do not prefix output lines with the line number
    #[arg(long)]
    no_line_number: bool,

    /// Do not highlight the matched span
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let matcher = match stana_match::matcher(&cli.pattern) {
        Ok(matcher) => matcher,
        Err(err) => {
            eprintln!("stanagrep: invalid pattern -- {err}");
            return ExitCode::from(2);
        }
    };

    let mut matched_any = false;
    let mut failed = false;
    for file in &cli.files {
        match grep_file(&cli, &matcher, file) {
            Ok(hits) => matched_any |= hits > 0,
            Err(message) => {
                eprintln!("stanagrep: {}: {message}", file.display());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(2)
    } else if matched_any {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn grep_file(cli: &Cli, matcher: &Matcher, file: &Path) -> Result<usize, String> {
    let contents = fs::read_to_string(file).map_err(|err| err.to_string())?;
    let tree: Value = serde_json::from_str(&contents).map_err(|err| err.to_string())?;
    let source = read_sibling_source(file);
    let source_lines: Option<Vec<&str>> = source.as_deref().map(|s| s.lines().collect());

    tracing::debug!(file = %file.display(), source = source.is_some(), "searching");

    let mut hits = 0;
    walk(&tree, &mut |node| {
        if matcher.is_match(node) {
            hits += 1;
            print_hit(cli, file, node, source_lines.as_deref());
        }
        Visit::Continue
    });
    Ok(hits)
}

/// The `.js` file next to `tree.json`, if present.
fn read_sibling_source(file: &Path) -> Option<String> {
    let sibling = file.with_extension("js");
    if sibling == file {
        return None;
    }
    fs::read_to_string(sibling).ok()
}

fn print_hit(cli: &Cli, file: &Path, node: &Value, source_lines: Option<&[&str]>) {
    let span = Span::of(node);

    let mut prefix = String::new();
    if !cli.no_filename {
        prefix.push_str(&format!("{}:", file.display()));
    }
    if !cli.no_line_number {
        if let Some(span) = &span {
            prefix.push_str(&format!("{}:", span.start_line));
        }
    }
    if !prefix.is_empty() {
        prefix.push(' ');
    }

    let rendered = match (span, source_lines) {
        (Some(span), Some(lines)) => span
            .start_line
            .checked_sub(1)
            .and_then(|index| lines.get(index))
            .map(|line| render_line(line, &span, cli.no_color)),
        _ => None,
    };

    match rendered {
        Some(line) => println!("{prefix}{line}"),
        None => println!("{prefix}{node}"),
    }
}

/// Source coordinates of a node, from its ESTree `loc` field. Lines are
/// 1-based, columns 0-based.
struct Span {
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
}

impl Span {
    fn of(node: &Value) -> Option<Span> {
        let loc = node.get("loc")?;
        let position = |key: &str| -> Option<(usize, usize)> {
            let point = loc.get(key)?;
            Some((
                point.get("line")?.as_u64()? as usize,
                point.get("column")?.as_u64()? as usize,
            ))
        };
        let (start_line, start_column) = position("start")?;
        let (end_line, end_column) = position("end")?;
        Some(Span { start_line, start_column, end_line, end_column })
    }
}

/// The matched source line with the span highlighted. A match that continues
/// past its first line highlights to the end of that line.
fn render_line(line: &str, span: &Span, no_color: bool) -> String {
    if no_color {
        return line.to_string();
    }
    let start = byte_offset(line, span.start_column);
    let end = if span.end_line == span.start_line {
        byte_offset(line, span.end_column).max(start)
    } else {
        line.len()
    };

    let (before, rest) = line.split_at(start);
    let (matched, after) = rest.split_at(end - start);
    format!("{before}{}{after}", matched.red())
}

/// Byte index of the `column`-th character; clamps past-the-end columns.
fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(index, _)| index)
        .unwrap_or(line.len())
}
