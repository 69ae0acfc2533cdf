use arrow_array::{ArrayRef, Int64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use arrow_table_core::{write, ParquetReadOptions, ParquetStream, Table, WriteOptions};
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_sample(rows: usize, chunk_size: usize) -> NamedTempFile {
    let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(Int64Array::from_iter_values(0..rows as i64)) as ArrayRef],
    )
    .unwrap();
    let table = Table::from_batch(batch);

    let file = NamedTempFile::new().unwrap();
    let options = WriteOptions::new().with_chunk_size(chunk_size);
    write::write_parquet(file.path(), &table, &options).unwrap();
    file
}

#[test]
fn test_stream_reads_all_rows() {
    let file = write_sample(100, 30);
    let mut stream = ParquetStream::open(file.path(), &ParquetReadOptions::new()).unwrap();

    let mut total = 0;
    let mut batches = 0;
    while let Some(table) = stream.next_table().unwrap() {
        total += table.num_rows();
        batches += 1;
    }
    assert_eq!(total, 100);
    assert!(batches >= 1);

    // exhausted stream keeps returning end-of-stream
    assert!(stream.next_table().unwrap().is_none());
}

#[test]
fn test_stream_respects_batch_size() {
    let file = write_sample(100, 100);
    let options = ParquetReadOptions::new().with_batch_size(7);
    let mut stream = ParquetStream::open(file.path(), &options).unwrap();

    let mut total = 0;
    while let Some(table) = stream.next_table().unwrap() {
        assert!(table.num_rows() <= 7);
        total += table.num_rows();
    }
    assert_eq!(total, 100);
}

#[test]
fn test_stream_projection() {
    let file = write_sample(10, 10);
    let options = ParquetReadOptions::new().with_columns(vec![0]);
    let mut stream = ParquetStream::open(file.path(), &options).unwrap();

    let table = stream.next_table().unwrap().unwrap();
    assert_eq!(table.num_columns(), 1);
    assert_eq!(table.schema().field(0).name(), "v");
}

#[test]
fn test_closed_stream_errors() {
    let file = write_sample(10, 10);
    let mut stream = ParquetStream::open(file.path(), &ParquetReadOptions::new()).unwrap();

    assert!(!stream.is_closed());
    stream.close();
    assert!(stream.is_closed());
    assert_eq!(format!("{:?}", stream), "ParquetStream { closed: true }");

    let err = stream.next_table().unwrap_err();
    assert!(err.to_string().contains("reader has already been closed"));

    // close is idempotent
    stream.close();
}

#[test]
fn test_stream_open_missing_file() {
    let err = ParquetStream::open(
        std::path::Path::new("/nonexistent/data.parquet"),
        &ParquetReadOptions::new(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("IO error"));
}
