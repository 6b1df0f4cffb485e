//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Inputs (`FfiKeyValue`) are borrowed from the C caller and never freed
//! here. Outputs (`FfiRestResult`, returned strings) are heap-allocated by
//! this library and must be released with the matching `restclient_free_*`
//! function. Conversion helpers live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::collections::BTreeMap;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use restclient_core::{ClientError, RestClient};

/// Opaque handle to a `RestClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiRestClient {
    pub(crate) inner: RestClient,
}

/// A borrowed key/value pair, used for query parameters and headers.
#[repr(C)]
pub struct FfiKeyValue {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// Error codes returned in `FfiRestResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    RequestConstruction = 1,
    Transport = 2,
    Read = 3,
    Config = 4,
    NullArg = 5,
    InvalidArg = 6,
    Panic = 7,
}

/// Result envelope for `restclient_request`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `body` holds
/// the response text. On failure `body` is null and `error_message` is a
/// human-readable C string.
#[repr(C)]
pub struct FfiRestResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub body: *mut c_char,
}

impl FfiRestResult {
    pub(crate) fn ok(body: String) -> *mut Self {
        Box::into_raw(Box::new(FfiRestResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            body: into_c_string(body),
        }))
    }

    pub(crate) fn from_error(err: ClientError) -> *mut Self {
        let code = match &err {
            ClientError::RequestConstruction(_) => FfiErrorCode::RequestConstruction,
            ClientError::Transport(_) => FfiErrorCode::Transport,
            ClientError::Read(_) => FfiErrorCode::Read,
            ClientError::Config(_) => FfiErrorCode::Config,
        };
        Self::error(code, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn invalid_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::InvalidArg, format!("invalid argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg.to_string())
    }

    fn error(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiRestResult {
            error_code,
            error_message: into_c_string(msg),
            body: std::ptr::null_mut(),
        }))
    }
}

/// Why a C argument could not be read.
pub(crate) enum ArgError {
    Null,
    Invalid,
}

/// Hand a Rust string to C. Text after an interior NUL cannot be represented
/// and is dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(e) => {
            let pos = e.nul_position();
            let mut bytes = e.into_vec();
            bytes.truncate(pos);
            CString::new(bytes).unwrap_or_default().into_raw()
        }
    }
}

/// Borrow a C string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char) -> Result<&'a str, ArgError> {
    if ptr.is_null() {
        return Err(ArgError::Null);
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| ArgError::Invalid)
}

/// Copy `len` key/value pairs into a map. A null `ptr` is accepted only when
/// `len` is zero.
///
/// # Safety
/// `ptr` must point to `len` valid `FfiKeyValue` entries.
pub(crate) unsafe fn read_pairs(
    ptr: *const FfiKeyValue,
    len: u32,
) -> Result<BTreeMap<String, String>, ArgError> {
    if len == 0 {
        return Ok(BTreeMap::new());
    }
    if ptr.is_null() {
        return Err(ArgError::Null);
    }
    let entries = unsafe { std::slice::from_raw_parts(ptr, len as usize) };
    let mut out = BTreeMap::new();
    for entry in entries {
        let key = unsafe { read_str(entry.key) }?;
        let value = unsafe { read_str(entry.value) }?;
        out.insert(key.to_string(), value.to_string());
    }
    Ok(out)
}
