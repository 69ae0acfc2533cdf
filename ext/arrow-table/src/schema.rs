//! Schema peeks and C Data Interface schema export

use crate::guard::{ffi_guard, handle_arg, path_arg};
use arrow::ffi::FFI_ArrowSchema;
use arrow_schema::Schema;
use arrow_table_core::{read, Result, Table};
use libc::c_char;
use std::ptr;

pub(crate) fn export_schema(schema: &Schema) -> Result<*mut FFI_ArrowSchema> {
    let ffi_schema = FFI_ArrowSchema::try_from(schema)?;
    Ok(Box::into_raw(Box::new(ffi_schema)))
}

/// Read the schema of an Arrow IPC file. Release with `schema_free`.
///
/// # Safety
/// `filename` must be a valid nul-terminated string; `err_out` null or
/// writable.
#[no_mangle]
pub unsafe extern "C" fn arrow_schema(
    filename: *const c_char,
    err_out: *mut *mut c_char,
) -> *mut FFI_ArrowSchema {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        let schema = read::ipc_schema(path)?;
        export_schema(&schema)
    })
}

/// Read the schema of a Feather file. Release with `schema_free`.
///
/// # Safety
/// Same contract as [`arrow_schema`].
#[no_mangle]
pub unsafe extern "C" fn feather_schema(
    filename: *const c_char,
    err_out: *mut *mut c_char,
) -> *mut FFI_ArrowSchema {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        let schema = read::ipc_schema(path)?;
        export_schema(&schema)
    })
}

/// Read the schema of a Parquet file and store its row count in
/// `num_rows`. Release the schema with `schema_free`.
///
/// # Safety
/// `filename` as in [`arrow_schema`]; `num_rows` must be valid for
/// writes; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn parquet_schema(
    filename: *const c_char,
    num_rows: *mut i64,
    err_out: *mut *mut c_char,
) -> *mut FFI_ArrowSchema {
    ffi_guard!(err_out, ptr::null_mut(), {
        let path = path_arg(filename, "filename")?;
        let (schema, rows) = read::parquet_schema(path)?;
        if !num_rows.is_null() {
            *num_rows = rows;
        }
        export_schema(&schema)
    })
}

/// The schema of a table handle. Release with `schema_free`.
///
/// # Safety
/// `table` must be a live table handle; `err_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn table_schema(
    table: *const Table,
    err_out: *mut *mut c_char,
) -> *mut FFI_ArrowSchema {
    ffi_guard!(err_out, ptr::null_mut(), {
        let table = handle_arg(table, "table")?;
        export_schema(table.schema())
    })
}

/// Release a schema returned by this library. Runs the C Data Interface
/// release callback, then frees the struct. Tolerates null.
///
/// # Safety
/// `schema` must be null or a pointer returned by this library, and must
/// not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn schema_free(schema: *mut FFI_ArrowSchema) {
    if !schema.is_null() {
        drop(Box::from_raw(schema));
    }
}
