//! C ABI over [`Engine`].
//!
//! Handles are opaque, heap-allocated, and owned by the caller until freed.
//! `tc_decide` stores the decision's detail inside the handle; the
//! `tc_last_*` accessors read it back and are valid only until the next
//! `tc_decide` on the same handle. A handle is not safe for concurrent use:
//! serialize `tc_decide` plus the reads that follow it, or use one handle per
//! in-flight attempt.
//!
//! Panics are caught at this boundary and reported as a rejected call.

use std::ffi::{c_char, c_int, CStr};
use std::panic::{self, AssertUnwindSafe};

use crate::abi;
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::model::{Outcome, RequestContext};
use crate::retry::ContractError;

/// Opaque engine handle.
pub struct TcClient {
    engine: Engine,
}

/// Mirrors `tc_request_context_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TcRequestContext {
    pub method: c_int,
    pub attempt: u8,
    pub max_attempts: u8,
    pub allow_non_idempotent_retry: bool,
    /// Nullable NUL-terminated string; NULL or "" means no key.
    pub idempotency_key: *const c_char,
}

/// Mirrors `tc_outcome_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TcOutcome {
    pub kind: c_int,
    pub http_status: u16,
    pub retry_after_ms: u32,
}

#[no_mangle]
pub extern "C" fn tc_abi_version() -> u32 {
    abi::ABI_VERSION
}

#[no_mangle]
pub extern "C" fn tc_client_new() -> *mut TcClient {
    Box::into_raw(Box::new(TcClient {
        engine: Engine::new(),
    }))
}

/// Create a handle whose forwarded retry-after hints never exceed `max_ms`.
#[no_mangle]
pub extern "C" fn tc_client_new_with_max_retry_after(max_ms: u32) -> *mut TcClient {
    let cfg = EngineConfig {
        max_retry_after_ms: Some(max_ms),
    };
    Box::into_raw(Box::new(TcClient {
        engine: Engine::from_config(&cfg),
    }))
}

/// Free a handle. NULL is ignored.
///
/// # Safety
/// `client` must be NULL or a pointer from `tc_client_new*` not yet freed.
#[no_mangle]
pub unsafe extern "C" fn tc_client_free(client: *mut TcClient) {
    if !client.is_null() {
        drop(Box::from_raw(client));
    }
}

/// Free the handle `*slot` points at and set `*slot` to NULL, so repeated
/// calls on the same slot are harmless.
///
/// # Safety
/// `slot` must be NULL or point to a handle slot as described for
/// [`tc_client_free`].
#[no_mangle]
pub unsafe extern "C" fn tc_client_destroy(slot: *mut *mut TcClient) {
    if slot.is_null() {
        return;
    }
    let client = std::mem::replace(&mut *slot, std::ptr::null_mut());
    tc_client_free(client);
}

/// Decide the next action for one attempt.
///
/// Returns a decision code (0 PROCEED, 1 RETRY, 2 REFRESH_AND_RETRY, 3 FAIL)
/// or -1 when the call violates the contract; `tc_last_error_code` then
/// says why.
///
/// # Safety
/// `client` must be a live handle. `ctx` and `outcome` must be NULL or
/// valid for reads, and `ctx.idempotency_key` NULL or a valid C string.
#[no_mangle]
pub unsafe extern "C" fn tc_decide(
    client: *mut TcClient,
    ctx: *const TcRequestContext,
    outcome: *const TcOutcome,
    auth_decision: c_int,
    refresh_result: i8,
) -> i32 {
    let Some(client) = client.as_mut() else {
        return abi::DECISION_INVALID;
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        decide_raw(&mut client.engine, ctx, outcome, auth_decision, refresh_result)
    }));

    match result {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            client.engine.reject(e);
            abi::DECISION_INVALID
        }
        Err(_) => {
            tracing::error!("panic caught at tc_decide boundary");
            client.engine.reject(ContractError::Panicked);
            abi::DECISION_INVALID
        }
    }
}

unsafe fn decide_raw(
    engine: &mut Engine,
    ctx: *const TcRequestContext,
    outcome: *const TcOutcome,
    auth_decision: c_int,
    refresh_result: i8,
) -> Result<i32, ContractError> {
    let ctx = ctx.as_ref().ok_or(ContractError::NullPointer("ctx"))?;
    let outcome = outcome
        .as_ref()
        .ok_or(ContractError::NullPointer("outcome"))?;

    let ctx = request_context(ctx)?;
    let outcome = outcome_from_raw(outcome)?;
    let auth_decision = abi::auth_decision_from_code(auth_decision)?;
    let refresh = abi::refresh_from_code(refresh_result)?;

    // Policy errors are recorded by the engine itself.
    match engine.decide(&ctx, &outcome, Some(auth_decision), refresh) {
        Ok(decision) => Ok(abi::decision_code(decision.kind())),
        Err(_) => Ok(abi::DECISION_INVALID),
    }
}

unsafe fn request_context(raw: &TcRequestContext) -> Result<RequestContext, ContractError> {
    let method = abi::method_from_code(raw.method)?;
    let idempotency_key = if raw.idempotency_key.is_null() {
        None
    } else {
        Some(
            CStr::from_ptr(raw.idempotency_key)
                .to_string_lossy()
                .into_owned(),
        )
    };
    Ok(RequestContext {
        method,
        attempt: raw.attempt,
        max_attempts: raw.max_attempts,
        allow_non_idempotent_retry: raw.allow_non_idempotent_retry,
        idempotency_key,
    })
}

fn outcome_from_raw(raw: &TcOutcome) -> Result<Outcome, ContractError> {
    abi::outcome_from_parts(raw.kind, raw.http_status, raw.retry_after_ms)
}

/// # Safety
/// `client` must be NULL or a live handle.
#[no_mangle]
pub unsafe extern "C" fn tc_last_retry_after_ms(client: *const TcClient) -> u32 {
    client
        .as_ref()
        .map_or(0, |c| c.engine.last_retry_after_ms())
}

/// # Safety
/// `client` must be NULL or a live handle.
#[no_mangle]
pub unsafe extern "C" fn tc_last_retry_reason(client: *const TcClient) -> u8 {
    client
        .as_ref()
        .map_or(0, |c| abi::retry_reason_code(c.engine.last_retry_reason()))
}

/// # Safety
/// `client` must be NULL or a live handle.
#[no_mangle]
pub unsafe extern "C" fn tc_last_fail_reason(client: *const TcClient) -> u8 {
    client
        .as_ref()
        .map_or(0, |c| abi::fail_reason_code(c.engine.last_fail_reason()))
}

/// # Safety
/// `client` must be NULL or a live handle.
#[no_mangle]
pub unsafe extern "C" fn tc_last_fail_retryable(client: *const TcClient) -> bool {
    client
        .as_ref()
        .is_some_and(|c| c.engine.last_fail_retryable())
}

/// # Safety
/// `client` must be NULL or a live handle. A NULL handle reports a null-pointer error.
#[no_mangle]
pub unsafe extern "C" fn tc_last_error_code(client: *const TcClient) -> u8 {
    match client.as_ref() {
        Some(c) => abi::error_code(c.engine.last_error()),
        None => abi::error_code(Some(ContractError::NullPointer("client"))),
    }
}
