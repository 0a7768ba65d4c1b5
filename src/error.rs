use thiserror::Error;

/// Failures of the yearly trend pipeline.
///
/// All variants are recoverable: a page that hits one shows a warning and skips its
/// chart, the rest of the application carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {required} distinct years, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid horizon: {horizon} precedes the first observed year {first_year}")]
    InvalidHorizon { horizon: i32, first_year: i32 },

    #[error("year {year} appears more than once in a yearly series")]
    DuplicateYear { year: i32 },

    #[error("grid shapes differ: {before_width}x{before_height} vs {after_width}x{after_height}")]
    GridShapeMismatch {
        before_width: usize,
        before_height: usize,
        after_width: usize,
        after_height: usize,
    },

    #[error("unsupported reduction for {variable}: only temperature and precipitation can be correlated with crops")]
    UnsupportedVariable { variable: String },
}

/// Errors raised while turning raw CSV exports into typed tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{column}' not found (tried: {tried})")]
    MissingColumn { column: String, tried: String },

    #[error("crop '{crop}' not found in agricultural data")]
    UnknownCrop { crop: String },

    #[error("species '{species}' not found in biodiversity data")]
    UnknownSpecies { species: String },

    #[error("no 'threatened species_YYYY' columns found")]
    NoYearColumns,

    #[error("no usable rows in {source_name}")]
    NoRows { source_name: String },

    #[error("invalid value '{value}' at row {row}, column {column}")]
    InvalidCell {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("ragged grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Outcome of a dashboard insight that could not be produced.
///
/// `Analysis` failures are expected on sparse data and are shown as warnings;
/// `Data` failures mean the input itself is unusable.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type InsightResult<T> = Result<T, InsightError>;
