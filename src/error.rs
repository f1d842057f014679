use thiserror::Error;

/// Convenience result type for import/ingestion operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Convenience result type for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Error type returned by file discovery, ingestion, and the CUR import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet ingestion error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The discovery pattern itself is malformed.
    #[error("invalid path pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path matched by the pattern could not be read during discovery.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Discovery matched no data files (status tables excluded).
    #[error("no input files matched '{pattern}'")]
    NoInput { pattern: String },

    /// The input does not conform to the expected schema (missing required
    /// columns, mismatched columns across merged files, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// The column-rename mapping file is not a flat JSON string-to-string object.
    #[error("invalid rename mapping: {message}")]
    RenameMapping { message: String },

    /// Resource classification failed while augmenting the imported dataset.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Error type returned by the resource classification engine.
///
/// An identifier that matches no rule is NOT an error; the matcher returns an
/// empty classification for it. These variants cover defects in the rule
/// table and caller contract violations only.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The rule table entry at index `rule` is malformed (partial condition
    /// triple, unsupported operator, or a type-part segment index that is out
    /// of range for an identifier the rule matched).
    #[error("rule {rule} misconfigured: {message}")]
    RuleConfig { rule: usize, message: String },

    /// A rule table file could not be parsed at all (malformed JSON or an
    /// unsupported condition operator).
    #[error("rule table invalid: {message}")]
    RuleTable { message: String },

    /// The batch applier was invoked against an empty dataset or a dataset
    /// missing the named identifier column.
    #[error("precondition failed: {message}")]
    Precondition { message: String },
}
