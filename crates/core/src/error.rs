use std::fmt;

/// The type a typed field was expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    Str,
    Bool,
    PositiveInt,
    PositiveFloat,
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::PositiveInt => "int positive",
            Self::PositiveFloat => "float positive",
        })
    }
}

/// The character class a text field was expected to be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    Alphanumeric,
    Numeric,
    Alpha,
}

impl fmt::Display for ExpectedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alphanumeric => "letters or / and numbers",
            Self::Numeric => "numbers",
            Self::Alpha => "letters",
        })
    }
}

/// Which side of a size bound was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Maximum,
    Minimum,
    Exactly,
}

impl fmt::Display for SizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Maximum => "maximum",
            Self::Minimum => "minimum",
            Self::Exactly => "exactly",
        })
    }
}

/// A size constraint: a character count or a number of decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeLimit {
    Chars(usize),
    DecimalPlaces(usize),
}

impl fmt::Display for SizeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chars(n) => write!(f, "{n}"),
            Self::DecimalPlaces(n) => write!(f, "{n} decimal places"),
        }
    }
}

/// Why a date field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateProblem {
    Incorrect,
    Expired,
}

/// Every error the catalog can report.
///
/// Each variant renders one fixed-format message. Variants that carry field
/// lists keep them in the order the offending fields were encountered.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("The following field(s) cannot be empty: {}", join(.fields))]
    EmptyField { fields: Vec<String> },

    #[error("The following field(s) must be of type {expected}: {}", join(.fields))]
    WrongType {
        fields: Vec<String>,
        expected: ExpectedType,
    },

    #[error("The following field(s) must be only {expected}: {}", join(.fields))]
    WrongShape {
        fields: Vec<String>,
        expected: ExpectedShape,
    },

    #[error(
        "The field(s) {} must be the following {kind} sizes respectively: {}",
        join_quoted(.fields),
        join(.limits)
    )]
    WrongSize {
        fields: Vec<String>,
        limits: Vec<SizeLimit>,
        kind: SizeKind,
    },

    #[error("The JSON data must contain the following field(s): {}", join(.fields))]
    InvalidJson { fields: Vec<String> },

    #[error("The ID(s) inserted does not exist in the database")]
    IdNotFound,

    #[error(
        "Check if the ID field(s) are entered correctly. If so, the following field(s) must be unique: {}",
        join(.fields)
    )]
    InvalidValue { fields: Vec<String> },

    #[error("The following values already exist in the database: {}", join(.values))]
    DuplicateValue { values: Vec<String> },

    #[error("{}", date_message(.0))]
    InvalidDate(DateProblem),

    #[error("E-mail must be a valid email")]
    InvalidEmail,

    #[error("No file")]
    NoFile,

    #[error("All the data in the file has already been added")]
    DataAlreadyExists,

    #[error("Check that the columns were typed correctly in the file and that all fields are separated by ',' ")]
    ColumnsMismatch,

    #[error("Check that the types of values match their columns")]
    ConversionFailure,

    #[error(
        "The following values are repeated in the file, but will be added only once: {}",
        join(.values)
    )]
    RepeatedInFile { values: Vec<String> },

    #[error("There is no data to be exported to a csv file")]
    NothingToExport,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build an error from a list of field names given as string slices.
    pub fn invalid_json(fields: &[&str]) -> Self {
        Self::InvalidJson {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn date_message(problem: &DateProblem) -> &'static str {
    match problem {
        DateProblem::Incorrect => "Incorrect data format. Validity date should be YYYY-MM-DD",
        DateProblem::Expired => "The validity date inserted is past it is expiry date",
    }
}
