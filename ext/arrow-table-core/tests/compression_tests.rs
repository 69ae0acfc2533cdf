use arrow_array::{ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use arrow_table_core::{read, write, Codec, ParquetReadOptions, Table, WriteOptions};
use std::sync::Arc;
use tempfile::NamedTempFile;

fn compressible_table(rows: usize) -> Table {
    let schema = Arc::new(Schema::new(vec![
        Field::new("seq", DataType::Int64, false),
        Field::new("repetitive", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(0..rows as i64)) as ArrayRef,
            Arc::new(StringArray::from_iter(
                (0..rows).map(|_| Some("A".repeat(100))),
            )),
        ],
    )
    .unwrap();
    Table::from_batch(batch)
}

#[test]
fn test_parquet_codecs_roundtrip() {
    let table = compressible_table(1000);
    let codecs = [
        Codec::Uncompressed,
        Codec::Snappy,
        Codec::Gzip,
        Codec::Brotli,
        Codec::Zstd,
        Codec::Lz4,
    ];

    for codec in codecs {
        let file = NamedTempFile::new().unwrap();
        let options = WriteOptions::new().with_codec(codec);
        write::write_parquet(file.path(), &table, &options).unwrap();

        let back = read::read_parquet(file.path(), &ParquetReadOptions::new()).unwrap();
        assert_eq!(back.num_rows(), 1000, "roundtrip failed for {:?}", codec);
    }
}

#[test]
fn test_parquet_compression_shrinks_repetitive_data() {
    let table = compressible_table(1000);

    let uncompressed = NamedTempFile::new().unwrap();
    write::write_parquet(
        uncompressed.path(),
        &table,
        &WriteOptions::new().with_codec(Codec::Uncompressed),
    )
    .unwrap();

    let zstd = NamedTempFile::new().unwrap();
    write::write_parquet(
        zstd.path(),
        &table,
        &WriteOptions::new().with_codec(Codec::Zstd),
    )
    .unwrap();

    let uncompressed_len = uncompressed.path().metadata().unwrap().len();
    let zstd_len = zstd.path().metadata().unwrap().len();
    assert!(
        zstd_len < uncompressed_len,
        "expected zstd ({}) to be smaller than uncompressed ({})",
        zstd_len,
        uncompressed_len
    );
}

#[test]
fn test_feather_codecs_roundtrip() {
    let table = compressible_table(500);
    for codec in [Codec::Uncompressed, Codec::Lz4Frame, Codec::Zstd] {
        let file = NamedTempFile::new().unwrap();
        let options = WriteOptions::new().with_codec(codec);
        write::write_feather(file.path(), &table, &options).unwrap();

        let back = read::read_feather(file.path(), None).unwrap();
        assert_eq!(back.num_rows(), 500, "roundtrip failed for {:?}", codec);
    }
}

#[test]
fn test_unsupported_codecs_error_before_writing() {
    let table = compressible_table(10);
    let file = NamedTempFile::new().unwrap();

    let err = write::write_parquet(
        file.path(),
        &table,
        &WriteOptions::new().with_codec(Codec::Lzo),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unsupported"));

    let err = write::write_feather(
        file.path(),
        &table,
        &WriteOptions::new().with_codec(Codec::Snappy),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unsupported"));
}

#[test]
fn test_chunk_size_controls_row_groups() {
    let table = compressible_table(100);
    let file = NamedTempFile::new().unwrap();
    let options = WriteOptions::new().with_chunk_size(30);
    write::write_parquet(file.path(), &table, &options).unwrap();

    let parquet_file = std::fs::File::open(file.path()).unwrap();
    let builder =
        parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder::try_new(parquet_file)
            .unwrap();
    assert_eq!(builder.metadata().num_row_groups(), 4);
}
