//! Error translation between core `Result`s and the caller's failure slot
//!
//! The analog of the begin/end protect-exception macro pair in C glue
//! code: every exported function wraps its body in [`ffi_guard!`], which
//! runs the body under `catch_unwind`, writes any error or panic message
//! into the caller-supplied `err_out` slot and returns a sentinel value.
//! Unwinding stops at the boundary, so RAII cleanup inside the body always
//! runs before the caller sees the failure.

use arrow_table_core::{Result, TableError};
use libc::c_char;
use std::any::Any;
use std::ffi::{CStr, CString};
use std::path::Path;

/// Run a fallible body behind the ABI.
///
/// `$body` is an expression evaluating to `arrow_table_core::Result<T>`;
/// `$default` is the sentinel returned to the caller on failure.
macro_rules! ffi_guard {
    ($err_out:expr, $default:expr, $body:expr) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(
            || -> arrow_table_core::Result<_> { $body },
        )) {
            Ok(Ok(value)) => {
                unsafe { $crate::guard::clear_error($err_out) };
                value
            }
            Ok(Err(e)) => {
                unsafe { $crate::guard::set_error($err_out, &e.to_string()) };
                $default
            }
            Err(panic) => {
                unsafe { $crate::guard::set_error($err_out, &$crate::guard::panic_message(panic)) };
                $default
            }
        }
    }};
}

pub(crate) use ffi_guard;

/// Write an error message into the caller's slot, if one was provided.
///
/// # Safety
/// `err_out` must be null or valid for writes.
pub(crate) unsafe fn set_error(err_out: *mut *mut c_char, msg: &str) {
    if err_out.is_null() {
        return;
    }
    // interior nuls are stripped, so CString construction cannot fail
    let sanitized = msg.replace('\0', " ");
    let cstring = CString::new(sanitized).unwrap_or_default();
    *err_out = cstring.into_raw();
}

/// Null out the caller's error slot, if one was provided.
///
/// # Safety
/// `err_out` must be null or valid for writes.
pub(crate) unsafe fn clear_error(err_out: *mut *mut c_char) {
    if !err_out.is_null() {
        *err_out = std::ptr::null_mut();
    }
}

/// Render a panic payload into a printable message.
pub(crate) fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic in arrow-table".to_string()
    }
}

/// Borrow a C string argument as a filesystem path.
///
/// # Safety
/// `ptr` must be null or a valid nul-terminated string.
pub(crate) unsafe fn path_arg<'a>(ptr: *const c_char, what: &str) -> Result<&'a Path> {
    if ptr.is_null() {
        return Err(TableError::invalid_argument(format!(
            "{} must not be null",
            what
        )));
    }
    let s = CStr::from_ptr(ptr).to_str()?;
    Ok(Path::new(s))
}

/// Borrow an opaque handle argument.
///
/// # Safety
/// `ptr` must be null or a live handle produced by this library.
pub(crate) unsafe fn handle_arg<'a, T>(ptr: *const T, what: &str) -> Result<&'a T> {
    ptr.as_ref()
        .ok_or_else(|| TableError::invalid_argument(format!("{} must not be null", what)))
}

/// Release an error message previously written to an `err_out` slot.
///
/// # Safety
/// `msg` must be null or a pointer obtained from this library's error
/// slot, and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn error_message_free(msg: *mut c_char) {
    if !msg.is_null() {
        drop(CString::from_raw(msg));
    }
}
