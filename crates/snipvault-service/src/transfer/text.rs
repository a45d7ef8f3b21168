//! Delimited plain-text interchange.
//!
//! Layout, one section per snippet:
//!
//! ```text
//! === Title ===
//! Language: rust
//! Tags: a, b
//! Public: yes
//! Description: one line
//!
//! <code>
//! ========================================
//! ```
//!
//! Header lines stop at the first blank line; everything after it up to a
//! line consisting of the 40-character separator is code. Code lines that
//! merely contain the separator survive; a code line that IS exactly the
//! separator cannot round-trip through this format. Multi-line descriptions
//! are flattened to one line; the JSON format is the lossless one.

use snipvault_core::error::{AppError, AppResult};

use super::SnippetTransfer;

/// The section separator: 40 equals signs.
const SEPARATOR: &str = "========================================";

/// Render records to the delimited text layout.
pub fn export(records: &[SnippetTransfer]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("=== {} ===\n", record.title));
        out.push_str(&format!("Language: {}\n", record.language));
        if let Some(tags) = &record.tags {
            out.push_str(&format!("Tags: {}\n", tags.join(", ")));
        }
        out.push_str(&format!(
            "Public: {}\n",
            if record.is_public { "yes" } else { "no" }
        ));
        if let Some(description) = &record.description {
            out.push_str(&format!(
                "Description: {}\n",
                description.replace('\n', " ")
            ));
        }
        out.push('\n');
        out.push_str(record.code.trim_end_matches('\n'));
        out.push('\n');
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

/// Parse the delimited text layout. Sections end at a line that is exactly
/// the separator; separator text embedded in a longer code line stays code.
pub fn import(content: &str) -> AppResult<Vec<SnippetTransfer>> {
    let mut records = Vec::new();
    let mut section_lines: Vec<&str> = Vec::new();
    for line in content.lines() {
        if line.trim_end() == SEPARATOR {
            push_section(&section_lines, &mut records)?;
            section_lines.clear();
        } else {
            section_lines.push(line);
        }
    }
    push_section(&section_lines, &mut records)?;

    if records.is_empty() {
        return Err(AppError::validation("No snippets found in text import"));
    }
    Ok(records)
}

fn push_section(lines: &[&str], records: &mut Vec<SnippetTransfer>) -> AppResult<()> {
    let section = lines.join("\n");
    let section = section.trim_matches('\n');
    if !section.trim().is_empty() {
        records.push(parse_section(section)?);
    }
    Ok(())
}

fn parse_section(section: &str) -> AppResult<SnippetTransfer> {
    let mut lines = section.lines();
    let title_line = lines
        .next()
        .ok_or_else(|| AppError::validation("Empty snippet section"))?;
    let title = title_line
        .strip_prefix("=== ")
        .and_then(|rest| rest.strip_suffix(" ==="))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::validation(format!("Expected '=== Title ===', got '{title_line}'"))
        })?;

    let mut language = String::new();
    let mut tags = None;
    let mut is_public = false;
    let mut description = None;

    // Header lines until the first blank line.
    let mut code_lines: Vec<&str> = Vec::new();
    let mut in_code = false;
    for line in lines {
        if in_code {
            code_lines.push(line);
            continue;
        }
        if line.trim().is_empty() {
            in_code = true;
            continue;
        }
        match line.split_once(':') {
            Some(("Language", v)) => language = v.trim().to_string(),
            Some(("Tags", v)) => {
                let parsed: Vec<String> = v
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if !parsed.is_empty() {
                    tags = Some(parsed);
                }
            }
            Some(("Public", v)) => is_public = v.trim().eq_ignore_ascii_case("yes"),
            Some(("Description", v)) => description = Some(v.trim().to_string()),
            _ => {
                // Unknown header line; treat as the start of the code body.
                in_code = true;
                code_lines.push(line);
            }
        }
    }

    if language.is_empty() {
        return Err(AppError::validation(format!(
            "Snippet '{title}' has no Language header"
        )));
    }

    Ok(SnippetTransfer {
        title: title.to_string(),
        description,
        code: code_lines.join("\n"),
        language,
        tags,
        is_public,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SnippetTransfer {
        SnippetTransfer {
            title: "Quick sort".into(),
            description: Some("Recursive".into()),
            code: "fn sort() {\n    todo!()\n}".into(),
            language: "rust".into(),
            tags: Some(vec!["algo".into(), "sort".into()]),
            is_public: true,
        }
    }

    #[test]
    fn test_round_trip() {
        let records = vec![
            sample(),
            SnippetTransfer {
                title: "minimal".into(),
                description: None,
                code: "print(1)".into(),
                language: "python".into(),
                tags: None,
                is_public: false,
            },
        ];
        let imported = import(&export(&records)).unwrap();
        assert_eq!(imported, records);
    }

    #[test]
    fn test_parses_documented_layout() {
        let content = "\
=== Hello ===
Language: go
Tags: web, http
Public: no

package main

func main() {}
========================================
";
        let records = import(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Hello");
        assert_eq!(records[0].language, "go");
        assert_eq!(records[0].tags.as_deref(), Some(&["web".to_string(), "http".to_string()][..]));
        assert_eq!(records[0].code, "package main\n\nfunc main() {}");
        assert!(!records[0].is_public);
    }

    #[test]
    fn test_separator_inside_a_longer_code_line_survives() {
        let record = SnippetTransfer {
            title: "banner".into(),
            description: None,
            code: format!("// {SEPARATOR}\nlet x = 1;"),
            language: "rust".into(),
            tags: None,
            is_public: false,
        };
        let imported = import(&export(&[record.clone()])).unwrap();
        assert_eq!(imported, vec![record]);
    }

    #[test]
    fn test_missing_title_marker_is_rejected() {
        assert!(import("Language: rust\n\ncode\n").is_err());
    }

    #[test]
    fn test_missing_language_is_rejected() {
        assert!(import("=== T ===\nPublic: no\n\ncode\n").is_err());
    }
}
