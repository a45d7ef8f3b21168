//! JSON interchange: a pretty-printed array of snippet records.

use snipvault_core::error::{AppError, AppResult};

use super::SnippetTransfer;

/// Serialize records to a JSON array.
pub fn export(records: &[SnippetTransfer]) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a JSON array of snippet records. A single object is accepted too.
pub fn import(content: &str) -> AppResult<Vec<SnippetTransfer>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Import content is empty"));
    }
    if trimmed.starts_with('{') {
        let record: SnippetTransfer = serde_json::from_str(trimmed)
            .map_err(|e| AppError::validation(format!("Invalid snippet JSON: {e}")))?;
        return Ok(vec![record]);
    }
    serde_json::from_str(trimmed)
        .map_err(|e| AppError::validation(format!("Invalid snippet JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SnippetTransfer {
        SnippetTransfer {
            title: "Quick sort".into(),
            description: Some("Recursive, in place".into()),
            code: "fn sort() {}\n".into(),
            language: "rust".into(),
            tags: Some(vec!["algo".into(), "sort".into()]),
            is_public: true,
        }
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let records = vec![
            sample(),
            SnippetTransfer {
                title: "minimal".into(),
                description: None,
                code: "x".into(),
                language: "python".into(),
                tags: None,
                is_public: false,
            },
        ];
        let exported = export(&records).unwrap();
        let imported = import(&exported).unwrap();
        assert_eq!(imported, records);
    }

    #[test]
    fn test_single_object_is_accepted() {
        let exported = serde_json::to_string(&sample()).unwrap();
        let imported = import(&exported).unwrap();
        assert_eq!(imported, vec![sample()]);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let imported =
            import(r#"[{"title":"t","code":"c","language":"go"}]"#).unwrap();
        assert_eq!(imported[0].tags, None);
        assert!(!imported[0].is_public);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(import("not json").is_err());
        assert!(import("").is_err());
    }
}
