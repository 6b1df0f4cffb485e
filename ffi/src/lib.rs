//! C-ABI wrapper around `restclient-core`.
//!
//! # Overview
//! Lets an application written in any language with a C FFI construct a
//! `RestClient`, adjust its default headers, send requests and build URLs
//! from templates.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary. The client holds a ureq agent, which is
//!   not `RefUnwindSafe`, so closures that touch it use `AssertUnwindSafe`.
//! - A single `FfiRestResult` envelope carries either the response text or
//!   an error code and message.
//! - The C caller owns all returned pointers and must call the matching
//!   `restclient_free_*` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use restclient_core::{HttpMethod, RestClient};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `RestClient` bound to `base_url` with `headers_len` default
/// headers. `headers` may be null when `headers_len` is zero.
///
/// Returns null if `base_url` is null, an argument is not UTF-8, or an
/// internal panic occurs. The caller must free the returned pointer with
/// `restclient_free`.
#[unsafe(no_mangle)]
pub extern "C" fn restclient_new(
    base_url: *const c_char,
    headers: *const FfiKeyValue,
    headers_len: u32,
    verbose_logging: bool,
) -> *mut FfiRestClient {
    catch_unwind(|| {
        let Ok(url) = (unsafe { read_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let Ok(headers) = (unsafe { read_pairs(headers, headers_len) }) else {
            return std::ptr::null_mut();
        };
        let client = RestClient::new(url, headers, verbose_logging);
        Box::into_raw(Box::new(FfiRestClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `restclient_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn restclient_free(client: *mut FfiRestClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

/// Set a default header sent with every later request.
///
/// Returns false if any argument is null or not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn restclient_set_header(
    client: *mut FfiRestClient,
    name: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return false;
        }
        let (Ok(name), Ok(value)) = (unsafe { read_str(name) }, unsafe { read_str(value) }) else {
            return false;
        };
        let client = unsafe { &mut *client };
        client.inner.set_default_header(name, value);
        true
    }))
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send `method` (`"GET"`, `"PUT"`, `"POST"` or `"DELETE"`, exact case) to
/// `base_url + path + query string`.
///
/// `query` and `headers` point to `query_len` / `headers_len` pairs and may
/// be null when the length is zero. `body` may be null (sent as empty) and is
/// ignored for GET. The caller must free the result with
/// `restclient_free_result`.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn restclient_request(
    client: *const FfiRestClient,
    method: *const c_char,
    path: *const c_char,
    query: *const FfiKeyValue,
    query_len: u32,
    headers: *const FfiKeyValue,
    headers_len: u32,
    body: *const c_char,
) -> *mut FfiRestResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiRestResult::null_arg("client");
        }
        let client = unsafe { &*client };

        let method = match unsafe { read_str(method) } {
            Ok(m) => m,
            Err(e) => return arg_error(e, "method"),
        };
        let method: HttpMethod = match method.parse() {
            Ok(m) => m,
            Err(e) => return FfiRestResult::from_error(e),
        };
        let path = match unsafe { read_str(path) } {
            Ok(p) => p,
            Err(e) => return arg_error(e, "path"),
        };
        let query = match unsafe { read_pairs(query, query_len) } {
            Ok(q) => q,
            Err(e) => return arg_error(e, "query"),
        };
        let headers = match unsafe { read_pairs(headers, headers_len) } {
            Ok(h) => h,
            Err(e) => return arg_error(e, "headers"),
        };
        let body = match unsafe { read_str(body) } {
            Ok(b) => b,
            Err(ArgError::Null) => "",
            Err(e) => return arg_error(e, "body"),
        };

        match client.inner.send(method, path, &query, &headers, body) {
            Ok(text) => FfiRestResult::ok(text),
            Err(e) => FfiRestResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiRestResult::panic("panic in restclient_request"))
}

fn arg_error(err: ArgError, name: &str) -> *mut FfiRestResult {
    match err {
        ArgError::Null => FfiRestResult::null_arg(name),
        ArgError::Invalid => FfiRestResult::invalid_arg(name),
    }
}

/// Substitute `args` (alternating find, replace) into `template` and prepend
/// the client's base URL.
///
/// Returns null on null or non-UTF-8 arguments or an odd `args_len`. The
/// caller must free the returned string with `restclient_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn restclient_make_url(
    client: *const FfiRestClient,
    template: *const c_char,
    args: *const *const c_char,
    args_len: u32,
) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() || (args.is_null() && args_len > 0) {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Ok(template) = (unsafe { read_str(template) }) else {
            return std::ptr::null_mut();
        };
        let raw_args: &[*const c_char] = if args_len == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(args, args_len as usize) }
        };
        let mut pairs = Vec::with_capacity(raw_args.len());
        for &arg in raw_args {
            match unsafe { read_str(arg) } {
                Ok(s) => pairs.push(s),
                Err(_) => return std::ptr::null_mut(),
            }
        }
        match client.inner.make_url(template, &pairs) {
            Ok(url) => into_c_string(url),
            Err(_) => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a result returned by `restclient_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn restclient_free_result(result: *mut FfiRestResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.body.is_null() {
            drop(unsafe { CString::from_raw(result.body) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn restclient_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
