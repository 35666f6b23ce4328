use super::build::extract_operations;
use super::document::Document;
use super::types::OperationMeta;
use anyhow::Context;
use std::path::Path;

/// Load an API description document from a YAML or JSON file.
///
/// Dispatches on the file extension: `.yaml`/`.yml` parse through the YAML
/// front end, everything else is treated as JSON. Both land in the same
/// value tree.
pub fn load_document(file_path: impl AsRef<Path>) -> anyhow::Result<Document> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read spec file {}", file_path.display()))?;

    let is_yaml = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let root: serde_json::Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML spec {}", file_path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON spec {}", file_path.display()))?
    };

    Ok(Document::new(root))
}

/// Load a document and extract its operation metadata in one step.
pub fn load_operations(
    file_path: impl AsRef<Path>,
) -> anyhow::Result<(Document, Vec<OperationMeta>)> {
    let doc = load_document(file_path)?;
    let operations = extract_operations(&doc);
    Ok((doc, operations))
}
