use std::fmt;

/// HTTP methods the engine knows how to reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// True when repeating the request has the same effect as sending it once.
    ///
    /// PUT and DELETE count as idempotent by convention; only POST does not.
    pub fn is_idempotent(self) -> bool {
        matches!(
            self,
            HttpMethod::Get
                | HttpMethod::Head
                | HttpMethod::Options
                | HttpMethod::Put
                | HttpMethod::Delete
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(format!("unknown HTTP method: {other}")),
        }
    }
}

/// Per-attempt request facts the driver supplies.
///
/// `attempt` is 1-based and names the attempt whose outcome is being
/// evaluated. A retry is only ever offered while `attempt < max_attempts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: HttpMethod,
    pub attempt: u8,
    /// Inclusive attempt ceiling for the logical request.
    pub max_attempts: u8,
    /// Caller override allowing retry of methods that are not idempotent.
    pub allow_non_idempotent_retry: bool,
    /// Server-side deduplication token; makes any method safe to repeat.
    pub idempotency_key: Option<String>,
}

impl RequestContext {
    pub fn new(method: HttpMethod, attempt: u8, max_attempts: u8) -> Self {
        Self {
            method,
            attempt,
            max_attempts,
            allow_non_idempotent_retry: false,
            idempotency_key: None,
        }
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    pub fn allowing_non_idempotent_retry(mut self) -> Self {
        self.allow_non_idempotent_retry = true;
        self
    }

    /// True while another attempt fits in the budget.
    pub fn has_budget(&self) -> bool {
        self.attempt < self.max_attempts
    }

    /// An empty key cannot be deduplicated server-side, so it counts as absent.
    pub fn has_idempotency_key(&self) -> bool {
        self.idempotency_key
            .as_deref()
            .is_some_and(|k| !k.is_empty())
    }

    /// True when a second physical attempt is safe: the method is idempotent,
    /// the caller opted in, or a deduplication key is attached.
    pub fn is_safe_to_repeat(&self) -> bool {
        self.method.is_idempotent() || self.allow_non_idempotent_retry || self.has_idempotency_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_post_is_non_idempotent() {
        assert!(!HttpMethod::Post.is_idempotent());
        for m in [
            HttpMethod::Get,
            HttpMethod::Head,
            HttpMethod::Options,
            HttpMethod::Put,
            HttpMethod::Delete,
        ] {
            assert!(m.is_idempotent(), "{m} should be idempotent");
        }
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Options".parse::<HttpMethod>().unwrap(), HttpMethod::Options);
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn empty_idempotency_key_is_absent() {
        let ctx = RequestContext::new(HttpMethod::Post, 1, 3).with_idempotency_key("");
        assert!(!ctx.has_idempotency_key());
        assert!(!ctx.is_safe_to_repeat());

        let ctx = ctx.with_idempotency_key("order-42");
        assert!(ctx.has_idempotency_key());
        assert!(ctx.is_safe_to_repeat());
    }

    #[test]
    fn budget_is_exclusive_of_ceiling() {
        assert!(RequestContext::new(HttpMethod::Get, 2, 3).has_budget());
        assert!(!RequestContext::new(HttpMethod::Get, 3, 3).has_budget());
        assert!(!RequestContext::new(HttpMethod::Get, 7, 3).has_budget());
    }
}
