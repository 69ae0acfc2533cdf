//! File readers: Parquet, Feather (Arrow IPC), CSV and JSON

use crate::{ErrorContext, Result, Table, TableError};
use arrow::csv;
use arrow::ipc::reader::FileReader;
use arrow::json;
use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_schema::SchemaRef;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};
use parquet::arrow::ProjectionMask;
use parquet::file::reader::ChunkReader;
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

/// Options for reading a Parquet file.
#[derive(Debug, Clone, Default)]
pub struct ParquetReadOptions {
    columns: Option<Vec<usize>>,
    row_limit: Option<usize>,
    batch_size: Option<usize>,
}

impl ParquetReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project onto the given root-column indices.
    pub fn with_columns(mut self, columns: Vec<usize>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Stop after the first `limit` rows of the file.
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    /// Rows per record batch produced by the reader.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }
}

fn parquet_builder<R: ChunkReader + 'static>(
    reader: R,
    options: &ParquetReadOptions,
) -> Result<ParquetRecordBatchReaderBuilder<R>> {
    let mut builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;

    if let Some(columns) = &options.columns {
        let n_cols = builder.schema().fields().len();
        for &idx in columns {
            if idx >= n_cols {
                return Err(TableError::invalid_argument(format!(
                    "invalid column index {} (ncols: {})",
                    idx, n_cols
                )));
            }
        }
        let mask = ProjectionMask::roots(builder.parquet_schema(), columns.iter().copied());
        builder = builder.with_projection(mask);
    }
    if let Some(size) = options.batch_size {
        builder = builder.with_batch_size(size);
    }
    Ok(builder)
}

/// Read the schema and row count of a Parquet file from its footer.
pub fn parquet_schema(path: &Path) -> Result<(SchemaRef, i64)> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let num_rows = builder.metadata().file_metadata().num_rows();
    Ok((builder.schema().clone(), num_rows))
}

/// Read a whole Parquet file into a table.
pub fn read_parquet(path: &Path, options: &ParquetReadOptions) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_parquet_from(file, options)
}

/// Read Parquet data from any chunked source (an open file, in-memory
/// `bytes::Bytes`, ...) into a table.
pub fn read_parquet_from<R: ChunkReader + 'static>(
    reader: R,
    options: &ParquetReadOptions,
) -> Result<Table> {
    let mut builder = parquet_builder(reader, options)?;
    if let Some(limit) = options.row_limit {
        builder = builder.with_limit(limit);
    }
    let reader = builder.build()?;
    collect_batches(reader.schema(), reader)
}

/// Read the schema of an Arrow IPC (or Feather V2) file.
pub fn ipc_schema(path: &Path) -> Result<SchemaRef> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = FileReader::try_new(file, None)?;
    Ok(reader.schema())
}

/// Read a whole Feather (Arrow IPC) file into a table, optionally
/// projecting onto the given column indices.
pub fn read_feather(path: &Path, columns: Option<Vec<usize>>) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = FileReader::try_new(file, columns.clone())?;
    // with a projection the batches carry the projected schema, not the
    // schema reported by the reader
    let schema = match &columns {
        Some(cols) => Arc::new(reader.schema().project(cols)?),
        None => reader.schema(),
    };
    collect_batches(schema, reader)
}

/// Read a CSV file into a table.
///
/// Expects a header row; the schema is inferred from the file contents.
pub fn read_csv(path: &Path) -> Result<Table> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let format = csv::reader::Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, None)?;
    file.seek(SeekFrom::Start(0))?;
    let schema = Arc::new(schema);
    let reader = csv::ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(file)?;
    collect_batches(schema, reader)
}

/// Read a newline-delimited JSON file into a table.
///
/// The schema is inferred from the file contents.
pub fn read_json(path: &Path) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let (schema, _) = json::reader::infer_json_schema_from_seekable(&mut buf, None)?;
    let schema = Arc::new(schema);
    let reader = json::ReaderBuilder::new(schema.clone()).build(buf)?;
    collect_batches(schema, reader)
}

fn collect_batches<I>(schema: SchemaRef, batches: I) -> Result<Table>
where
    I: IntoIterator<Item = std::result::Result<RecordBatch, arrow_schema::ArrowError>>,
{
    let batches = batches
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Table::new(schema, batches)
}

/// A streaming Parquet reader handing back one table per record batch.
///
/// `close` drops the underlying reader early and is idempotent; reading
/// after close is an error, matching the two-step close/free lifecycle
/// the boundary exposes.
pub struct ParquetStream {
    reader: Option<ParquetRecordBatchReader>,
}

impl ParquetStream {
    /// Open a Parquet file for streaming.
    ///
    /// The row-limit option is ignored here; streaming callers decide
    /// themselves when to stop pulling batches.
    pub fn open(path: &Path, options: &ParquetReadOptions) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let reader = parquet_builder(file, options)?.build()?;
        Ok(Self {
            reader: Some(reader),
        })
    }

    /// Pull the next record batch as a single-chunk table.
    ///
    /// Returns `Ok(None)` at end of stream.
    pub fn next_table(&mut self) -> Result<Option<Table>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| TableError::invalid_argument("reader has already been closed"))?;
        match reader.next() {
            Some(Ok(batch)) => Ok(Some(Table::from_batch(batch))),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Release the underlying reader. Safe to call more than once.
    pub fn close(&mut self) {
        self.reader = None;
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

// the inner reader is not Debug
impl std::fmt::Debug for ParquetStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParquetStream")
            .field("closed", &self.is_closed())
            .finish()
    }
}
