//! File writers: Parquet and Feather (Arrow IPC)

use crate::{Codec, ErrorContext, Result, Table};
use arrow::ipc::writer::{FileWriter, IpcWriteOptions};
use arrow_array::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;

/// Options shared by the table writers.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    codec: Codec,
    chunk_size: Option<usize>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            codec: Codec::Uncompressed,
            chunk_size: None,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression codec.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Set the rows per Parquet row group / Feather chunk.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }
}

/// Write a table to a Parquet file.
pub fn write_parquet(path: &Path, table: &Table, options: &WriteOptions) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut props = WriterProperties::builder().set_compression(options.codec.to_parquet()?);
    if let Some(chunk_size) = options.chunk_size {
        props = props.set_max_row_group_size(chunk_size);
    }
    let mut writer = ArrowWriter::try_new(file, table.schema().clone(), Some(props.build()))?;
    for batch in table.batches() {
        writer.write(batch)?;
    }
    writer.close()?;
    Ok(())
}

/// Write a table to a Feather V2 (compressed Arrow IPC) file.
pub fn write_feather(path: &Path, table: &Table, options: &WriteOptions) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let ipc_options = IpcWriteOptions::default().try_with_compression(options.codec.to_ipc()?)?;
    let mut writer = FileWriter::try_new_with_options(file, table.schema(), ipc_options)?;
    write_batches_chunked(&mut writer, table.batches(), options.chunk_size)?;
    writer.finish()?;
    Ok(())
}

/// Write a table to a plain Arrow IPC file.
pub fn write_ipc(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = FileWriter::try_new(file, table.schema())?;
    for batch in table.batches() {
        writer.write(batch)?;
    }
    writer.finish()?;
    Ok(())
}

/// Write batches, re-slicing them so no IPC message exceeds `chunk_size`
/// rows.
fn write_batches_chunked<W: std::io::Write>(
    writer: &mut FileWriter<W>,
    batches: &[RecordBatch],
    chunk_size: Option<usize>,
) -> Result<()> {
    for batch in batches {
        match chunk_size {
            None => writer.write(batch)?,
            Some(chunk_size) if chunk_size == 0 || batch.num_rows() <= chunk_size => {
                writer.write(batch)?
            }
            Some(chunk_size) => {
                let mut offset = 0;
                while offset < batch.num_rows() {
                    let len = chunk_size.min(batch.num_rows() - offset);
                    writer.write(&batch.slice(offset, len))?;
                    offset += len;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Table;
    use arrow_array::{ArrayRef, Int64Array};
    use arrow_schema::{DataType, Field, Schema};
    use std::sync::Arc;

    #[test]
    fn test_chunked_ipc_write_splits_batches() {
        let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, false)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(Int64Array::from_iter_values(0..10)) as ArrayRef],
        )
        .unwrap();
        let table = Table::from_batch(batch);

        let mut buffer = Vec::new();
        {
            let mut writer = FileWriter::try_new(&mut buffer, table.schema()).unwrap();
            write_batches_chunked(&mut writer, table.batches(), Some(4)).unwrap();
            writer.finish().unwrap();
        }

        let cursor = std::io::Cursor::new(buffer);
        let reader = arrow::ipc::reader::FileReader::try_new(cursor, None).unwrap();
        let sizes: Vec<usize> = reader.map(|b| b.unwrap().num_rows()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }
}
