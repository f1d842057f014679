//! Core data model types.
//!
//! The import pipeline ingests CUR exports into an in-memory [`DataSet`]: an
//! ordered [`Schema`] of typed [`Field`]s plus row-major [`Value`] storage.

use std::collections::HashMap;

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer. Timestamps ingest as epoch milliseconds.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the expected shape of incoming data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Keep only the named fields, in their current schema order.
    pub fn select(&self, names: &[String]) -> Schema {
        let fields = self
            .fields
            .iter()
            .filter(|f| names.iter().any(|n| n == &f.name))
            .cloned()
            .collect();
        Schema::new(fields)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns the string contents for `Utf8` values, `None` otherwise.
    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric view used by row filters and reductions. Integers widen to
    /// `f64`; everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`]
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Returns the position of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Insert a column at `position`, shifting existing columns right.
    ///
    /// # Panics
    ///
    /// Panics if `position > column_count()` or if `values` does not have
    /// exactly one entry per row.
    pub fn insert_column(&mut self, position: usize, field: Field, values: Vec<Value>) {
        assert!(
            position <= self.schema.fields.len(),
            "insert position {} out of bounds for {} columns",
            position,
            self.schema.fields.len()
        );
        assert!(
            values.len() == self.rows.len(),
            "column has {} values but dataset has {} rows",
            values.len(),
            self.rows.len()
        );

        self.schema.fields.insert(position, field);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(position, value);
        }
    }

    /// Remove a column by name, returning its field and values, or `None` if
    /// no such column exists.
    pub fn remove_column(&mut self, name: &str) -> Option<(Field, Vec<Value>)> {
        let idx = self.schema.index_of(name)?;
        let field = self.schema.fields.remove(idx);
        let values = self.rows.iter_mut().map(|row| row.remove(idx)).collect();
        Some((field, values))
    }

    /// Clone out a single column's values by position.
    ///
    /// # Panics
    ///
    /// Panics if `position >= column_count()`.
    pub fn column_values(&self, position: usize) -> Vec<Value> {
        assert!(
            position < self.schema.fields.len(),
            "column position {} out of bounds for {} columns",
            position,
            self.schema.fields.len()
        );
        self.rows.iter().map(|row| row[position].clone()).collect()
    }

    /// Rename columns per a `{current -> preferred}` mapping. Names absent
    /// from the schema are ignored. Returns the number of columns renamed.
    pub fn rename_columns(&mut self, mapping: &HashMap<String, String>) -> usize {
        let mut renamed = 0;
        for field in &mut self.schema.fields {
            if let Some(new_name) = mapping.get(&field.name) {
                field.name = new_name.clone();
                renamed += 1;
            }
        }
        renamed
    }

    /// Append all rows of `other`, which must share this dataset's schema.
    pub fn append(&mut self, other: DataSet) -> Result<(), crate::error::ImportError> {
        if other.schema != self.schema {
            return Err(crate::error::ImportError::SchemaMismatch {
                message: format!(
                    "cannot merge datasets with differing schemas ({:?} vs {:?})",
                    self.schema.field_names().collect::<Vec<_>>(),
                    other.schema.field_names().collect::<Vec<_>>()
                ),
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, DataType, Field, Schema, Value};
    use std::collections::HashMap;

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("cost", DataType::Float64),
        ]);
        let rows = vec![
            vec![Value::Int64(1), Value::Utf8("a".to_string()), Value::Float64(1.5)],
            vec![Value::Int64(2), Value::Utf8("b".to_string()), Value::Float64(2.5)],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn insert_column_shifts_existing_columns() {
        let mut ds = sample_dataset();
        ds.insert_column(
            1,
            Field::new("tag", DataType::Utf8),
            vec![Value::Utf8("x".to_string()), Value::Null],
        );

        assert_eq!(ds.column_index("tag"), Some(1));
        assert_eq!(ds.column_index("name"), Some(2));
        assert_eq!(ds.rows[0][1], Value::Utf8("x".to_string()));
        assert_eq!(ds.rows[1][1], Value::Null);
        assert_eq!(ds.rows[0][2], Value::Utf8("a".to_string()));
    }

    #[test]
    fn remove_column_returns_field_and_values() {
        let mut ds = sample_dataset();
        let (field, values) = ds.remove_column("name").unwrap();

        assert_eq!(field.name, "name");
        assert_eq!(
            values,
            vec![Value::Utf8("a".to_string()), Value::Utf8("b".to_string())]
        );
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Float64(1.5)]);
        assert!(ds.remove_column("name").is_none());
    }

    #[test]
    fn rename_columns_ignores_unknown_names() {
        let mut ds = sample_dataset();
        let mut mapping = HashMap::new();
        mapping.insert("cost".to_string(), "unblended_cost".to_string());
        mapping.insert("missing".to_string(), "whatever".to_string());

        assert_eq!(ds.rename_columns(&mapping), 1);
        assert_eq!(ds.column_index("unblended_cost"), Some(2));
        assert_eq!(ds.column_index("cost"), None);
    }

    #[test]
    fn append_requires_matching_schema() {
        let mut ds = sample_dataset();
        let other = sample_dataset();
        ds.append(other).unwrap();
        assert_eq!(ds.row_count(), 4);

        let mismatched = DataSet::new(
            Schema::new(vec![Field::new("id", DataType::Int64)]),
            vec![vec![Value::Int64(9)]],
        );
        let err = ds.append(mismatched).unwrap_err();
        assert!(err.to_string().contains("differing schemas"));
    }

    #[test]
    fn value_numeric_view_widens_integers() {
        assert_eq!(Value::Int64(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float64(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::Utf8("3".to_string()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }
}
