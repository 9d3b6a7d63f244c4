/// What happened to one request attempt, as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Connection-level failure (reset, DNS, refused).
    NetworkError,
    /// Connect or read timed out.
    TimeoutError,
    /// A response arrived with this status code (100..=599).
    HttpStatus(u16),
    /// The server asked us to slow down. `retry_after_ms` of 0 means no hint.
    RateLimited { retry_after_ms: u32 },
    /// Permanent rejection such as an IP ban.
    Blocked,
    /// A verification challenge the engine cannot solve.
    CaptchaChallenge,
}
