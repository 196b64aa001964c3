//! Best-effort comment scanner for Rust source text.
//!
//! Finds `struct Name { .. }` and `enum Name { .. }` blocks and binds the
//! comment lines directly above a field or variant to that member. This is a
//! line-oriented heuristic, not a parser: braces inside string literals or
//! block comments confuse it.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::DocTable;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?(struct|enum)\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("header pattern is valid")
});

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?(?:r#)?([A-Za-z_][A-Za-z0-9_]*)\s*:(?:[^:]|$)")
        .expect("field pattern is valid")
});

static VARIANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Za-z0-9_]*)\s*(?:[,({=]|$)").expect("variant pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Struct,
    Enum,
}

struct Block {
    kind: BlockKind,
    owner: String,
    depth: i32,
}

/// Scan `source` and collect member comments for every struct and enum.
///
/// Members are keyed by their Rust identifier. The emitter looks comments up
/// by emitted name, so a field renamed with `#[baml(rename)]` or `rename_all`
/// does not pick up its scanned comment; its `///` docs registered by the
/// derive still apply.
pub fn extract_comments(source: &str) -> DocTable {
    let mut table = DocTable::new();
    let mut block: Option<Block> = None;
    // Header seen, opening brace not yet.
    let mut awaiting: Option<(BlockKind, String)> = None;
    let mut pending: Option<String> = None;

    for line in source.lines() {
        let line = line.trim();

        let Some(current) = block.as_mut() else {
            if let Some(caps) = HEADER.captures(line) {
                let kind = if &caps[1] == "struct" {
                    BlockKind::Struct
                } else {
                    BlockKind::Enum
                };
                awaiting = Some((kind, caps[2].to_string()));
            }
            if line.contains('{')
                && let Some((kind, owner)) = awaiting.take()
            {
                let depth = brace_delta(line);
                if depth > 0 {
                    block = Some(Block { kind, owner, depth });
                }
            } else if line.ends_with(';') {
                awaiting = None;
            }
            pending = None;
            continue;
        };

        if let Some(text) = comment_text(line) {
            if current.depth == 1 {
                pending = Some(match pending.take() {
                    Some(prev) if text.is_empty() => prev,
                    Some(prev) if !prev.is_empty() => format!("{prev} {text}"),
                    _ => text.to_string(),
                });
            }
            continue;
        }

        if current.depth == 1 && !line.is_empty() && !line.starts_with("#[") {
            let member = match current.kind {
                BlockKind::Struct => FIELD.captures(line),
                BlockKind::Enum => VARIANT.captures(line),
            }
            .map(|caps| caps[1].to_string());

            match (member, pending.take()) {
                (Some(member), Some(text)) if !text.is_empty() => {
                    table.insert(current.owner.clone(), member, text);
                }
                _ => {}
            }
        }

        current.depth += brace_delta(line);
        if current.depth <= 0 {
            block = None;
            pending = None;
        }
    }

    tracing::debug!(comments = table.len(), "scanned source comments");
    table
}

/// Read `path` and scan it. An unreadable file yields an empty table.
///
/// Keys follow [`extract_comments`]: Rust identifiers, not renamed names.
pub fn load_comments(path: impl AsRef<Path>) -> DocTable {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(source) => extract_comments(&source),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot read source for comments");
            DocTable::new()
        }
    }
}

/// Text of a `///` or `//` line comment. Inner doc comments (`//!`) are not
/// member documentation.
fn comment_text(line: &str) -> Option<&str> {
    if line.starts_with("//!") {
        return None;
    }
    let rest = line
        .strip_prefix("///")
        .or_else(|| line.strip_prefix("//"))?;
    Some(rest.trim())
}

fn brace_delta(line: &str) -> i32 {
    let code = line.split("//").next().unwrap_or(line);
    code.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}
