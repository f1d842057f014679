//! Column-rename mapping support.
//!
//! CUR column names are long (`line_item_resource_id`); analysts keep a JSON
//! file mapping them to the short names they actually want to type. The file
//! is a flat `{"original": "preferred"}` object.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::types::DataSet;

/// Load a rename mapping from a JSON file.
pub fn load_rename_mapping(path: impl AsRef<Path>) -> ImportResult<HashMap<String, String>> {
    let text = fs::read_to_string(path.as_ref())?;
    serde_json::from_str(&text).map_err(|e| ImportError::RenameMapping {
        message: format!("{} ({})", e, path.as_ref().display()),
    })
}

/// Apply a rename mapping to a dataset's columns in place.
///
/// Mapping keys absent from the dataset are ignored. Returns the number of
/// columns renamed.
pub fn apply_rename_mapping(dataset: &mut DataSet, mapping: &HashMap<String, String>) -> usize {
    dataset.rename_columns(mapping)
}

#[cfg(test)]
mod tests {
    use super::load_rename_mapping;
    use crate::error::ImportError;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_json(name: &str, contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("cur-dataprep-{name}-{nanos}.json"));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_flat_string_mapping() {
        let path = tmp_json(
            "rename-ok",
            r#"{"line_item_resource_id": "resource_id", "line_item_unblended_cost": "cost"}"#,
        );

        let mapping = load_rename_mapping(&path).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["line_item_resource_id"], "resource_id");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_non_string_values() {
        let path = tmp_json("rename-bad", r#"{"line_item_resource_id": 7}"#);

        let err = load_rename_mapping(&path).unwrap_err();
        assert!(matches!(err, ImportError::RenameMapping { .. }));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_rename_mapping("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
