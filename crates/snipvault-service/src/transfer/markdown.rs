//! Markdown interchange.
//!
//! Layout, one section per snippet:
//!
//! ````text
//! # Title
//!
//! **Language:** rust
//! **Tags:** a, b
//! **Public:** yes
//! **Description:** one line
//!
//! ```rust
//! <code>
//! ```
//! ````
//!
//! Sections start at a top-level `# ` heading; headings inside fenced code
//! blocks are ignored. Code that itself contains backtick fences is wrapped
//! in a longer fence, and the parser closes a block only on a bare backtick
//! line at least as long as its opener.

use snipvault_core::error::{AppError, AppResult};

use super::SnippetTransfer;

/// Render records to Markdown.
pub fn export(records: &[SnippetTransfer]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("# {}\n\n", record.title));
        out.push_str(&format!("**Language:** {}\n", record.language));
        if let Some(tags) = &record.tags {
            out.push_str(&format!("**Tags:** {}\n", tags.join(", ")));
        }
        out.push_str(&format!(
            "**Public:** {}\n",
            if record.is_public { "yes" } else { "no" }
        ));
        if let Some(description) = &record.description {
            out.push_str(&format!(
                "**Description:** {}\n",
                description.replace('\n', " ")
            ));
        }
        let fence = fence_for(&record.code);
        out.push_str(&format!(
            "\n{fence}{}\n{}\n{fence}\n\n",
            record.language,
            record.code.trim_end_matches('\n')
        ));
    }
    out
}

/// A fence longer than any backtick run opening a code line, minimum three.
fn fence_for(code: &str) -> String {
    let longest = code
        .lines()
        .map(|l| leading_backticks(l))
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

fn leading_backticks(line: &str) -> usize {
    line.chars().take_while(|&c| c == '`').count()
}

/// Parse the Markdown layout.
pub fn import(content: &str) -> AppResult<Vec<SnippetTransfer>> {
    let mut records = Vec::new();
    let mut current: Option<Section> = None;
    // Backtick count of the open fence; 0 when outside a code block.
    let mut fence_len = 0usize;

    for line in content.lines() {
        let ticks = leading_backticks(line);
        if fence_len == 0 {
            if ticks >= 3 && current.is_some() {
                fence_len = ticks;
                continue;
            }
            if let Some(title) = line.strip_prefix("# ") {
                if let Some(done) = current.take() {
                    records.push(done.finish()?);
                }
                current = Some(Section::new(title.trim()));
                continue;
            }
        } else if ticks >= fence_len && line.trim_end().chars().all(|c| c == '`') {
            fence_len = 0;
            continue;
        }
        if let Some(section) = current.as_mut() {
            section.push_line(line, fence_len > 0);
        }
    }
    if let Some(done) = current.take() {
        records.push(done.finish()?);
    }

    if records.is_empty() {
        return Err(AppError::validation("No snippets found in Markdown import"));
    }
    Ok(records)
}

/// One in-progress snippet section.
struct Section {
    title: String,
    language: Option<String>,
    tags: Option<Vec<String>>,
    is_public: bool,
    description: Option<String>,
    code_lines: Vec<String>,
}

impl Section {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            language: None,
            tags: None,
            is_public: false,
            description: None,
            code_lines: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str, in_fence: bool) {
        if in_fence {
            self.code_lines.push(line.to_string());
            return;
        }
        let Some(field) = line.strip_prefix("**") else {
            return;
        };
        let Some((label, value)) = field.split_once(":**") else {
            return;
        };
        let value = value.trim();
        match label {
            "Language" => self.language = Some(value.to_string()),
            "Tags" => {
                let parsed: Vec<String> = value
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if !parsed.is_empty() {
                    self.tags = Some(parsed);
                }
            }
            "Public" => self.is_public = value.eq_ignore_ascii_case("yes"),
            "Description" => self.description = Some(value.to_string()),
            _ => {}
        }
    }

    fn finish(self) -> AppResult<SnippetTransfer> {
        if self.title.is_empty() {
            return Err(AppError::validation("Snippet heading has no title"));
        }
        let language = self.language.ok_or_else(|| {
            AppError::validation(format!(
                "Snippet '{}' has no **Language:** field",
                self.title
            ))
        })?;
        Ok(SnippetTransfer {
            title: self.title,
            description: self.description,
            code: self.code_lines.join("\n"),
            language,
            tags: self.tags,
            is_public: self.is_public,
        })
    }
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
    fn test_heading_inside_fence_does_not_split() {
        let record = SnippetTransfer {
            title: "Shell".into(),
            description: None,
            code: "# not a heading\necho hi".into(),
            language: "bash".into(),
            tags: None,
            is_public: false,
        };
        let imported = import(&export(&[record.clone()])).unwrap();
        assert_eq!(imported, vec![record]);
    }

    #[test]
    fn test_code_containing_a_fence_round_trips() {
        let record = SnippetTransfer {
            title: "Docs".into(),
            description: None,
            code: "```rust\nfn main() {}\n```".into(),
            language: "markdown".into(),
            tags: None,
            is_public: false,
        };
        let rendered = export(&[record.clone()]);
        assert!(rendered.contains("````markdown"));
        let imported = import(&rendered).unwrap();
        assert_eq!(imported, vec![record]);
    }

    #[test]
    fn test_parses_documented_layout() {
        let content = "\
# Hello

**Language:** go
**Tags:** web
**Public:** yes

```go
package main
```
";
        let records = import(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Hello");
        assert_eq!(records[0].language, "go");
        assert!(records[0].is_public);
        assert_eq!(records[0].code, "package main");
    }

    #[test]
    fn test_missing_language_is_rejected() {
        assert!(import("# T\n\n```\ncode\n```\n").is_err());
    }

    #[test]
    fn test_no_headings_is_rejected() {
        assert!(import("just text").is_err());
    }
}
