//! Whole-file table reads and writes across the boundary

use crate::guard::{ffi_guard, handle_arg, path_arg};
use crate::table::import_record_batch;
use arrow::ffi::{FFI_ArrowArray, FFI_ArrowSchema};
use arrow_table_core::{read, write, Codec, ParquetReadOptions, Result, Table, WriteOptions};
use libc::{c_char, c_int};
use std::ptr;

/// Interpret a `(col_idxs, ncols)` pair as an optional projection.
pub(crate) unsafe fn column_indices(
    col_idxs: *const c_int,
    ncols: c_int,
) -> Result<Option<Vec<usize>>> {
    if col_idxs.is_null() || ncols <= 0 {
        return Ok(None);
    }
    let indices = std::slice::from_raw_parts(col_idxs, ncols as usize);
    let mut out = Vec::with_capacity(indices.len());
    for &idx in indices {
        if idx < 0 {
            return Err(arrow_table_core::TableError::invalid_argument(format!(
                "negative column index {}",
                idx
            )));
        }
        out.push(idx as usize);
    }
    Ok(Some(out))
}

fn write_options(chunk_size: c_int, compression: c_int) -> Result<WriteOptions> {
    let mut options = WriteOptions::new().with_codec(Codec::from_code(compression)?);
    if chunk_size > 0 {
        options = options.with_chunk_size(chunk_size as usize);
    }
    Ok(options)
}

fn into_handle(table: Table) -> *mut Table {
    Box::into_raw(Box::new(table))
}

/// Read a Parquet file into a table handle. `col_idxs`/`ncols` optionally
/// project columns; a non-negative `only_first` keeps just the first rows.
///
/// # Safety
/// `filename` must be a valid nul-terminated string; `col_idxs` null or
/// an array of `ncols` ints; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn parquet_read_table(
    filename: *const c_char,
    col_idxs: *const c_int,
    ncols: c_int,
    only_first: i64,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        let mut options = ParquetReadOptions::new();
        if let Some(columns) = column_indices(col_idxs, ncols)? {
            options = options.with_columns(columns);
        }
        if only_first >= 0 {
            options = options.with_row_limit(only_first as usize);
        }
        Ok(into_handle(read::read_parquet(path, &options)?))
    })
}

/// Read a Feather (Arrow IPC) file into a table handle, with optional
/// column projection.
///
/// # Safety
/// As [`parquet_read_table`].
#[no_mangle]
pub unsafe extern "C" fn feather_read_table(
    filename: *const c_char,
    col_idxs: *const c_int,
    ncols: c_int,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        let columns = column_indices(col_idxs, ncols)?;
        Ok(into_handle(read::read_feather(path, columns)?))
    })
}

/// Read a CSV file (header row, inferred schema) into a table handle.
///
/// # Safety
/// `filename` must be a valid nul-terminated string; `err_out` null or
/// writable.
#[no_mangle]
pub unsafe extern "C" fn csv_read_table(
    filename: *const c_char,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        Ok(into_handle(read::read_csv(path)?))
    })
}

/// Read a newline-delimited JSON file (inferred schema) into a table
/// handle.
///
/// # Safety
/// As [`csv_read_table`].
#[no_mangle]
pub unsafe extern "C" fn json_read_table(
    filename: *const c_char,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        Ok(into_handle(read::read_json(path)?))
    })
}

/// Write a table handle to a Parquet file. `chunk_size` caps rows per row
/// group when positive; `compression` is a codec code.
///
/// # Safety
/// `filename` must be a valid nul-terminated string; `table` a live table
/// handle; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn parquet_write_table(
    filename: *const c_char,
    table: *const Table,
    chunk_size: c_int,
    compression: c_int,
    err_out: *mut *mut c_char,
) {
    ffi_guard!(err_out, (), {
        let path = path_arg(filename, "filename")?;
        let table = handle_arg(table, "table")?;
        let options = write_options(chunk_size, compression)?;
        write::write_parquet(path, table, &options)
    })
}

/// Write a table handle to a Feather V2 file.
///
/// # Safety
/// As [`parquet_write_table`].
#[no_mangle]
pub unsafe extern "C" fn feather_write_table(
    filename: *const c_char,
    table: *const Table,
    chunk_size: c_int,
    compression: c_int,
    err_out: *mut *mut c_char,
) {
    ffi_guard!(err_out, (), {
        let path = path_arg(filename, "filename")?;
        let table = handle_arg(table, "table")?;
        let options = write_options(chunk_size, compression)?;
        write::write_feather(path, table, &options)
    })
}

/// Import a C Data Interface record batch and write it straight to a
/// Parquet file. Consumes the array and schema structs.
///
/// # Safety
/// `filename` must be a valid nul-terminated string; `array`/`schema`
/// valid C Data Interface structs; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn parquet_write_file(
    filename: *const c_char,
    array: *mut FFI_ArrowArray,
    schema: *mut FFI_ArrowSchema,
    chunk_size: c_int,
    compression: c_int,
    err_out: *mut *mut c_char,
) {
    ffi_guard!(err_out, (), {
        let path = path_arg(filename, "filename")?;
        let batch = import_record_batch(array, schema)?;
        let options = write_options(chunk_size, compression)?;
        write::write_parquet(path, &Table::from_batch(batch), &options)
    })
}

/// Import a C Data Interface record batch and write it straight to a
/// Feather V2 file. Consumes the array and schema structs.
///
/// # Safety
/// As [`parquet_write_file`].
#[no_mangle]
pub unsafe extern "C" fn feather_write_file(
    filename: *const c_char,
    array: *mut FFI_ArrowArray,
    schema: *mut FFI_ArrowSchema,
    chunk_size: c_int,
    compression: c_int,
    err_out: *mut *mut c_char,
) {
    ffi_guard!(err_out, (), {
        let path = path_arg(filename, "filename")?;
        let batch = import_record_batch(array, schema)?;
        let options = write_options(chunk_size, compression)?;
        write::write_feather(path, &Table::from_batch(batch), &options)
    })
}

/// Import a C Data Interface record batch and write it straight to a
/// plain Arrow IPC file. Consumes the array and schema structs.
///
/// # Safety
/// As [`parquet_write_file`].
#[no_mangle]
pub unsafe extern "C" fn arrow_write_file(
    filename: *const c_char,
    array: *mut FFI_ArrowArray,
    schema: *mut FFI_ArrowSchema,
    err_out: *mut *mut c_char,
) {
    ffi_guard!(err_out, (), {
        let path = path_arg(filename, "filename")?;
        let batch = import_record_batch(array, schema)?;
        write::write_ipc(path, &Table::from_batch(batch))
    })
}
