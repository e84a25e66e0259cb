//! BibTeX entry segmentation and title extraction.
//!
//! The loader only needs the `title` field of each entry, so this parser
//! stays deliberately small: it segments `@type{...}` blocks with brace and
//! quote awareness, splits the field list, and pulls out the title. Malformed
//! entries produce skip messages instead of failing the whole file.

use std::collections::HashMap;

/// Block types that carry no bibliography entry.
const IGNORED_BLOCK_TYPES: [&str; 3] = ["comment", "preamble", "string"];

/// A single parsed BibTeX entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibtexEntry {
    /// Entry type (`article`, `book`, ...), lowercased.
    pub entry_type: String,
    /// Citation key after `@type{`.
    pub key: String,
    /// Parsed title when the entry has one.
    pub title: Option<String>,
}

/// Batch parse result for a bibliography file.
#[derive(Debug, Clone, Default)]
pub struct BibtexParseResult {
    /// Parsed entries, in file order.
    pub entries: Vec<BibtexEntry>,
    /// Skip messages for malformed entries.
    pub skipped: Vec<String>,
    /// Total candidate `@...{...}` segments discovered.
    pub total_found: usize,
}

/// Parses BibTeX entries from input text.
#[must_use]
pub fn parse_bibtex_entries(input: &str) -> BibtexParseResult {
    let mut result = BibtexParseResult::default();
    let segments = segment_entries(input);
    result.total_found = segments.len();

    for raw_entry in &segments {
        match parse_entry(raw_entry) {
            EntryOutcome::Parsed(entry) => result.entries.push(entry),
            EntryOutcome::Ignore => {}
            EntryOutcome::Skip(message) => result.skipped.push(message),
        }
    }

    result
}

#[derive(Debug)]
enum EntryOutcome {
    Parsed(BibtexEntry),
    Ignore,
    Skip(String),
}

/// Splits input into raw `@type{...}` segments, tracking brace depth and
/// quoted strings so commas and braces inside values do not end an entry.
fn segment_entries(input: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut entries = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i].1 != '@' {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && chars[j].1.is_ascii_alphabetic() {
            j += 1;
        }
        while j < chars.len() && chars[j].1.is_whitespace() {
            j += 1;
        }

        if j >= chars.len() || chars[j].1 != '{' {
            i += 1;
            continue;
        }

        let start = chars[i].0;
        let mut depth = 0usize;
        let mut in_quotes = false;
        let mut escape = false;
        let mut found_end = None;

        for (k, (_, ch)) in chars.iter().enumerate().skip(j) {
            if escape {
                escape = false;
                continue;
            }
            if *ch == '\\' {
                escape = true;
                continue;
            }
            if *ch == '"' {
                in_quotes = !in_quotes;
                continue;
            }
            if in_quotes {
                continue;
            }
            if *ch == '{' {
                depth += 1;
                continue;
            }
            if *ch == '}' {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                if depth == 0 {
                    found_end = Some(k);
                    break;
                }
            }
        }

        if let Some(end_index) = found_end {
            let end_exclusive = if end_index + 1 < chars.len() {
                chars[end_index + 1].0
            } else {
                input.len()
            };
            entries.push(input[start..end_exclusive].trim().to_string());
            i = end_index + 1;
        } else {
            // Recovery path for entries with unbalanced braces: capture the
            // malformed segment until the next likely entry start (`@` at
            // line start), then continue scanning.
            let mut recovery = i + 1;
            while recovery < chars.len() {
                if chars[recovery].1 == '@'
                    && (recovery == 0 || matches!(chars[recovery - 1].1, '\n' | '\r'))
                {
                    break;
                }
                recovery += 1;
            }

            if recovery < chars.len() {
                let end_exclusive = chars[recovery].0;
                entries.push(input[start..end_exclusive].trim().to_string());
                i = recovery;
                continue;
            }

            entries.push(input[start..].trim().to_string());
            break;
        }
    }

    entries
}

fn parse_entry(raw_entry: &str) -> EntryOutcome {
    let trimmed = raw_entry.trim();
    let Some(at_pos) = trimmed.find('@') else {
        return EntryOutcome::Skip(
            "malformed BibTeX entry: missing '@type{...}' prefix".to_string(),
        );
    };
    let after_at = &trimmed[at_pos + 1..];
    let Some(brace_pos) = after_at.find('{') else {
        return EntryOutcome::Skip(format!(
            "malformed BibTeX entry `{}`: missing opening '{{' after entry type",
            preview(trimmed)
        ));
    };

    let entry_type = after_at[..brace_pos].trim().to_ascii_lowercase();
    if IGNORED_BLOCK_TYPES.contains(&entry_type.as_str()) {
        return EntryOutcome::Ignore;
    }

    let body = &after_at[brace_pos + 1..];
    if !trimmed.ends_with('}') {
        return EntryOutcome::Skip(format!(
            "malformed BibTeX entry `{}`: unbalanced braces (entry never closed)",
            preview(trimmed)
        ));
    }
    let body = &body[..body.len().saturating_sub(1)];
    let Some((key_raw, fields_raw)) = body.split_once(',') else {
        return EntryOutcome::Skip(format!(
            "malformed BibTeX entry `{}`: missing citation key or field list",
            preview(trimmed)
        ));
    };

    let key = key_raw.trim();
    if key.is_empty() {
        return EntryOutcome::Skip(format!(
            "malformed BibTeX entry `{}`: empty citation key",
            preview(trimmed)
        ));
    }

    let fields = match parse_fields(fields_raw) {
        Ok(fields) => fields,
        Err(reason) => {
            return EntryOutcome::Skip(format!(
                "malformed BibTeX field assignment in `{}`: {reason}",
                preview(trimmed)
            ));
        }
    };

    let title = fields
        .get("title")
        .map(|value| normalize_title(value))
        .filter(|value| !value.is_empty());

    EntryOutcome::Parsed(BibtexEntry {
        entry_type,
        key: key.to_string(),
        title,
    })
}

/// Splits a field list on top-level commas and parses `name = value` pairs.
fn parse_fields(input: &str) -> Result<HashMap<String, String>, String> {
    let mut pairs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escape = false;

    for ch in input.chars() {
        if escape {
            current.push(ch);
            escape = false;
            continue;
        }
        if ch == '\\' {
            current.push(ch);
            escape = true;
            continue;
        }
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
            continue;
        }
        if !in_quotes {
            if ch == '{' {
                depth += 1;
            } else if ch == '}' {
                if depth == 0 {
                    return Err("closing brace without matching opening brace".to_string());
                }
                depth -= 1;
            } else if ch == ',' && depth == 0 {
                let segment = current.trim();
                if !segment.is_empty() {
                    pairs.push(segment.to_string());
                }
                current.clear();
                continue;
            }
        }
        current.push(ch);
    }

    if in_quotes {
        return Err("unterminated quoted value".to_string());
    }
    if depth != 0 {
        return Err("unbalanced braces in field values".to_string());
    }

    let tail = current.trim();
    if !tail.is_empty() {
        pairs.push(tail.to_string());
    }

    let mut fields = HashMap::new();
    for pair in pairs {
        let Some((name, value_raw)) = pair.split_once('=') else {
            return Err(format!("missing '=' in field segment `{pair}`"));
        };
        let field_name = name.trim().to_ascii_lowercase();
        if field_name.is_empty() {
            return Err("empty field name".to_string());
        }
        let value = strip_bibtex_value(value_raw.trim())
            .ok_or_else(|| format!("invalid value in field `{field_name}`"))?;
        // First-value-wins per standard BibTeX convention.
        fields.entry(field_name).or_insert(value);
    }

    Ok(fields)
}

/// Removes the outer `{...}` or `"..."` delimiters from a field value.
fn strip_bibtex_value(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_end_matches(',').trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') && trimmed.ends_with('}') && trimmed.len() >= 2 {
        return Some(trimmed[1..trimmed.len() - 1].trim().to_string());
    }
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        let inner = &trimmed[1..trimmed.len() - 1];
        return Some(inner.replace("\\\"", "\"").trim().to_string());
    }

    Some(trimmed.to_string())
}

/// Collapses whitespace and strips stray braces so multi-line titles become
/// usable search text.
fn normalize_title(value: &str) -> String {
    value
        .replace(['{', '}'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn preview(input: &str) -> String {
    const MAX: usize = 80;
    if input.chars().count() <= MAX {
        return input.to_string();
    }
    let shortened: String = input.chars().take(MAX).collect();
    format!("{shortened}...")
}
