//! Streaming Parquet reader handles

use crate::guard::{ffi_guard, path_arg};
use crate::io::column_indices;
use arrow_table_core::{ParquetReadOptions, ParquetStream, Table};
use libc::{c_char, c_int};
use std::ptr;

/// Open a Parquet file for streaming reads. `col_idxs`/`ncols` optionally
/// project columns; a positive `batch_size` caps rows per batch. Release
/// the handle with `parquet_reader_free` after `parquet_reader_close`.
///
/// # Safety
/// `filename` must be a valid nul-terminated string; `col_idxs` null or
/// an array of `ncols` ints; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn parquet_reader_open(
    filename: *const c_char,
    col_idxs: *const c_int,
    ncols: c_int,
    batch_size: c_int,
    err_out: *mut *mut c_char,
) -> *mut ParquetStream {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        let mut options = ParquetReadOptions::new();
        if let Some(columns) = column_indices(col_idxs, ncols)? {
            options = options.with_columns(columns);
        }
        if batch_size > 0 {
            options = options.with_batch_size(batch_size as usize);
        }
        let stream = ParquetStream::open(path, &options)?;
        Ok(Box::into_raw(Box::new(stream)))
    })
}

/// Pull the next batch as a fresh table handle.
///
/// Returns null at end of stream with `err_out` left null; a null return
/// with a non-null `err_out` is a failure. Reading a closed reader is a
/// failure.
///
/// # Safety
/// `reader` must be a live reader handle; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn parquet_reader_next(
    reader: *mut ParquetStream,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        let stream = reader.as_mut().ok_or_else(|| {
            arrow_table_core::TableError::invalid_argument("reader must not be null")
        })?;
        match stream.next_table()? {
            Some(table) => Ok(Box::into_raw(Box::new(table))),
            None => Ok(ptr::null_mut()),
        }
    })
}

/// Drop the underlying file reader, keeping the handle allocated.
/// Idempotent, tolerates null.
///
/// # Safety
/// `reader` must be null or a live reader handle.
#[no_mangle]
pub unsafe extern "C" fn parquet_reader_close(reader: *mut ParquetStream) {
    if let Some(stream) = reader.as_mut() {
        stream.close();
    }
}

/// Release a reader handle. Tolerates null.
///
/// # Safety
/// `reader` must be null or a live reader handle, and must not be used
/// afterwards.
#[no_mangle]
pub unsafe extern "C" fn parquet_reader_free(reader: *mut ParquetStream) {
    if !reader.is_null() {
        drop(Box::from_raw(reader));
    }
}
