//! `tc decide` – evaluate one attempt through the engine.

use anyhow::Result;
use transport_core::config::TcConfig;
use transport_core::{
    abi, AuthDecision, Decision, Engine, HttpMethod, Outcome, RefreshResult, RequestContext,
};

#[derive(Debug, Clone)]
pub struct DecideArgs {
    pub method: HttpMethod,
    pub attempt: u8,
    pub max_attempts: Option<u8>,
    pub allow_non_idempotent_retry: bool,
    pub idempotency_key: Option<String>,
    pub outcome: Outcome,
    pub auth: Option<AuthDecision>,
    pub refresh: Option<RefreshResult>,
}

/// Parse `network`, `timeout`, `blocked`, `captcha`, `status:<code>` or
/// `rate-limited[:<ms>]`.
pub fn parse_outcome(s: &str) -> Result<Outcome, String> {
    let (name, arg) = match s.split_once(':') {
        Some((n, a)) => (n, Some(a)),
        None => (s, None),
    };
    let number = |a: Option<&str>| -> Result<u32, String> {
        a.ok_or_else(|| format!("`{name}` needs a value, e.g. {name}:429"))?
            .parse::<u32>()
            .map_err(|e| format!("invalid number in `{s}`: {e}"))
    };
    match (name.to_ascii_lowercase().as_str(), arg) {
        ("network", None) => Ok(Outcome::NetworkError),
        ("timeout", None) => Ok(Outcome::TimeoutError),
        ("blocked", None) => Ok(Outcome::Blocked),
        ("captcha", None) => Ok(Outcome::CaptchaChallenge),
        ("rate-limited", None) => Ok(Outcome::RateLimited { retry_after_ms: 0 }),
        ("rate-limited", a) => Ok(Outcome::RateLimited {
            retry_after_ms: number(a)?,
        }),
        ("status", a) => {
            let code = number(a)?;
            u16::try_from(code)
                .map(Outcome::HttpStatus)
                .map_err(|_| format!("status {code} out of range"))
        }
        _ => Err(format!("unknown outcome `{s}`")),
    }
}

/// Render a decision the way the C smoke test prints it, numeric codes included.
pub fn render_detail(engine: &Engine, decision: &Decision) -> String {
    let kind = decision.kind();
    let mut out = format!("decision = {} ({})\n", abi::decision_code(kind), kind);
    out.push_str(&format!("retry_after_ms = {}\n", engine.last_retry_after_ms()));
    out.push_str(&format!(
        "retry_reason = {}\n",
        abi::retry_reason_code(engine.last_retry_reason())
    ));
    out.push_str(&format!(
        "fail_reason = {}\n",
        abi::fail_reason_code(engine.last_fail_reason())
    ));
    out.push_str(&format!(
        "fail_retryable = {}\n",
        u8::from(engine.last_fail_retryable())
    ));
    out
}

pub fn run_decide(cfg: &TcConfig, args: DecideArgs) -> Result<()> {
    let ctx = RequestContext {
        method: args.method,
        attempt: args.attempt,
        max_attempts: args.max_attempts.unwrap_or(cfg.default_max_attempts),
        allow_non_idempotent_retry: args.allow_non_idempotent_retry,
        idempotency_key: args.idempotency_key,
    };
    let mut engine = Engine::from_config(&cfg.engine());
    let decision = engine.decide(&ctx, &args.outcome, args.auth, args.refresh)?;
    print!("{}", render_detail(&engine, &decision));
    Ok(())
}
