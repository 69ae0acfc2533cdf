//! Integer datatype codes used by the chunked-column export calls

use arrow_schema::DataType;
use arrow_table_core::{Result, TableError};

/// Column datatype declared by the caller when fetching chunks.
///
/// The codes mirror the integer protocol across the boundary: 0 int64,
/// 1 float64, 2 utf8, 3 date32, 4 timestamp, 5 bool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int64,
    Float64,
    Utf8,
    Date32,
    Timestamp,
    Bool,
}

impl ColumnKind {
    pub fn from_code(code: i32) -> Result<Self> {
        Ok(match code {
            0 => ColumnKind::Int64,
            1 => ColumnKind::Float64,
            2 => ColumnKind::Utf8,
            3 => ColumnKind::Date32,
            4 => ColumnKind::Timestamp,
            5 => ColumnKind::Bool,
            _ => {
                return Err(TableError::invalid_argument(format!(
                    "unknown datatype {}",
                    code
                )))
            }
        })
    }

    /// Whether an Arrow datatype satisfies this declaration.
    pub fn matches(self, data_type: &DataType) -> bool {
        match self {
            ColumnKind::Int64 => matches!(data_type, DataType::Int64),
            ColumnKind::Float64 => matches!(data_type, DataType::Float64),
            // TODO: also handle large_utf8 here.
            ColumnKind::Utf8 => matches!(data_type, DataType::Utf8),
            ColumnKind::Date32 => matches!(data_type, DataType::Date32),
            ColumnKind::Timestamp => matches!(data_type, DataType::Timestamp(_, _)),
            ColumnKind::Bool => matches!(data_type, DataType::Boolean),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnKind::Int64 => "int64",
            ColumnKind::Float64 => "float64",
            ColumnKind::Utf8 => "utf8",
            ColumnKind::Date32 => "date32",
            ColumnKind::Timestamp => "timestamp",
            ColumnKind::Bool => "bool",
        }
    }
}
