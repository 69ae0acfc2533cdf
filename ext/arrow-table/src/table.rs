//! Opaque table handles: creation, slicing, concatenation, column export

use crate::datatype::ColumnKind;
use crate::guard::{ffi_guard, handle_arg};
use arrow::ffi::{from_ffi, to_ffi, FFI_ArrowArray, FFI_ArrowSchema};
use arrow_array::{Array, ArrayRef, RecordBatch, StructArray};
use arrow_schema::DataType;
use arrow_table_core::{Result, Table, TableError};
use libc::{c_char, c_int};
use std::ffi::CStr;
use std::ptr;

/// Import one C Data Interface record batch, consuming both structs.
///
/// Ownership of the caller's buffers moves into the returned batch; the
/// caller-side structs are left released (a later free is a no-op).
pub(crate) unsafe fn import_record_batch(
    array: *mut FFI_ArrowArray,
    schema: *mut FFI_ArrowSchema,
) -> Result<RecordBatch> {
    if array.is_null() || schema.is_null() {
        return Err(TableError::invalid_argument(
            "array and schema must not be null",
        ));
    }
    let array = ptr::replace(array, FFI_ArrowArray::empty());
    let schema = ptr::replace(schema, FFI_ArrowSchema::empty());
    let data = from_ffi(array, &schema)?;
    if !matches!(data.data_type(), DataType::Struct(_)) {
        return Err(TableError::schema(format!(
            "expected a struct array describing a record batch, got {}",
            data.data_type()
        )));
    }
    Ok(RecordBatch::from(StructArray::from(data)))
}

fn export_chunks(chunks: &[ArrayRef], kind: ColumnKind) -> Result<*mut FFI_ArrowArray> {
    let mut out = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        if !kind.matches(chunk.data_type()) {
            return Err(TableError::schema(format!(
                "expected type {}, got {}",
                kind.name(),
                chunk.data_type()
            )));
        }
        let (ffi_array, _ffi_schema) = to_ffi(&chunk.to_data())?;
        out.push(ffi_array);
    }
    Ok(Box::into_raw(out.into_boxed_slice()) as *mut FFI_ArrowArray)
}

unsafe fn chunked_column_impl(
    chunks: Result<Vec<ArrayRef>>,
    nchunks: *mut c_int,
    dtype_code: c_int,
) -> Result<*mut FFI_ArrowArray> {
    let kind = ColumnKind::from_code(dtype_code)?;
    let chunks = chunks?;
    let slab = export_chunks(&chunks, kind)?;
    if !nchunks.is_null() {
        *nchunks = chunks.len() as c_int;
    }
    Ok(slab)
}

/// Build a single-chunk table from a C Data Interface record batch.
/// Consumes both structs. Release the handle with `table_free`.
///
/// # Safety
/// `array` and `schema` must be valid C Data Interface structs; `err_out`
/// null or writable.
#[no_mangle]
pub unsafe extern "C" fn table_create(
    array: *mut FFI_ArrowArray,
    schema: *mut FFI_ArrowSchema,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        let batch = import_record_batch(array, schema)?;
        Ok(Box::into_raw(Box::new(Table::from_batch(batch))))
    })
}

/// Total rows in the table; 0 for a null handle.
///
/// # Safety
/// `table` must be null or a live table handle.
#[no_mangle]
pub unsafe extern "C" fn table_num_rows(table: *const Table) -> i64 {
    match table.as_ref() {
        Some(table) => table.num_rows() as i64,
        None => 0,
    }
}

/// Zero-copy slice of `length` rows starting at `offset`; offsets past
/// the end yield an empty table, the length is clamped.
///
/// # Safety
/// `table` must be a live table handle; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn table_slice(
    table: *const Table,
    offset: i64,
    length: i64,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        let table = handle_arg(table, "table")?;
        if offset < 0 {
            return Err(TableError::invalid_argument("negative offset"));
        }
        if length < 0 {
            return Err(TableError::invalid_argument("negative length"));
        }
        let sliced = table.slice(offset as usize, length as usize);
        Ok(Box::into_raw(Box::new(sliced)))
    })
}

/// Concatenate `ntables` tables sharing a schema into a new table.
///
/// # Safety
/// `tables` must point to `ntables` live table handles; `err_out` null or
/// writable.
#[no_mangle]
pub unsafe extern "C" fn table_concatenate(
    tables: *const *const Table,
    ntables: c_int,
    err_out: *mut *mut c_char,
) -> *mut Table {
    ffi_guard!(err_out, ptr::null_mut(), {
        if tables.is_null() || ntables < 0 {
            return Err(TableError::invalid_argument("invalid table list"));
        }
        let handles = std::slice::from_raw_parts(tables, ntables as usize);
        let mut refs = Vec::with_capacity(handles.len());
        for (idx, &handle) in handles.iter().enumerate() {
            refs.push(handle_arg(handle, &format!("table {}", idx))?);
        }
        let table = Table::concat(refs)?;
        Ok(Box::into_raw(Box::new(table)))
    })
}

/// Export one column as a contiguous slab of `*nchunks` C Data Interface
/// arrays, one per chunk. The chunks must match the declared datatype
/// code. Release with `chunked_column_free`.
///
/// # Safety
/// `table` must be a live table handle; `nchunks` must be valid for
/// writes; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn table_chunked_column(
    table: *const Table,
    column_idx: c_int,
    nchunks: *mut c_int,
    dtype_code: c_int,
    err_out: *mut *mut c_char,
) -> *mut FFI_ArrowArray {
    ffi_guard!(err_out, ptr::null_mut(), {
        let table_ref = handle_arg(table, "table")?;
        if column_idx < 0 {
            return Err(TableError::invalid_argument(format!(
                "invalid column index {} (ncols: {})",
                column_idx,
                table_ref.num_columns()
            )));
        }
        let chunks = table_ref.column(column_idx as usize);
        chunked_column_impl(chunks, nchunks, dtype_code)
    })
}

/// As [`table_chunked_column`], selecting the column by name.
///
/// # Safety
/// As [`table_chunked_column`]; `col_name` must be a valid nul-terminated
/// string.
#[no_mangle]
pub unsafe extern "C" fn table_chunked_column_by_name(
    table: *const Table,
    col_name: *const c_char,
    nchunks: *mut c_int,
    dtype_code: c_int,
    err_out: *mut *mut c_char,
) -> *mut FFI_ArrowArray {
    ffi_guard!(err_out, ptr::null_mut(), {
        let table_ref = handle_arg(table, "table")?;
        if col_name.is_null() {
            return Err(TableError::invalid_argument("column name must not be null"));
        }
        let name = CStr::from_ptr(col_name).to_str()?;
        let chunks = table_ref.column_by_name(name);
        chunked_column_impl(chunks, nchunks, dtype_code)
    })
}

/// Release a chunk slab returned by the chunked-column calls. Runs each
/// array's release callback. Tolerates null.
///
/// # Safety
/// `arrays` must be null or a slab of `nchunks` arrays returned by this
/// library, and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn chunked_column_free(arrays: *mut FFI_ArrowArray, nchunks: c_int) {
    if arrays.is_null() || nchunks < 0 {
        return;
    }
    let slice = ptr::slice_from_raw_parts_mut(arrays, nchunks as usize);
    drop(Box::from_raw(slice));
}

/// Release a table handle. Tolerates null.
///
/// # Safety
/// `table` must be null or a live table handle, and must not be used
/// afterwards.
#[no_mangle]
pub unsafe extern "C" fn table_free(table: *mut Table) {
    if !table.is_null() {
        drop(Box::from_raw(table));
    }
}
