//! Per-run invocation context.

use crate::error::ContextError;

/// The URL being opened plus every positional argument the handler received.
///
/// Built once at startup and passed by reference into every condition and
/// action. `raw_args[0]` is always `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    url: String,
    raw_args: Vec<String>,
}

impl InvocationContext {
    /// Build a context from positional arguments (program name already stripped).
    pub fn from_args<I, S>(args: I) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw_args: Vec<String> = args.into_iter().map(Into::into).collect();
        let url = raw_args.first().cloned().ok_or(ContextError::MissingUrl)?;
        Ok(Self { url, raw_args })
    }

    /// Context for a single URL with no extra arguments.
    pub fn for_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            raw_args: vec![url.clone()],
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn raw_args(&self) -> &[String] {
        &self.raw_args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_argument_is_url() {
        let ctx = InvocationContext::from_args(["https://a.example", "--new-window"]).unwrap();
        assert_eq!(ctx.url(), "https://a.example");
        assert_eq!(ctx.raw_args(), &["https://a.example", "--new-window"]);
    }

    #[test]
    fn test_empty_args_rejected() {
        let err = InvocationContext::from_args(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ContextError::MissingUrl));
    }

    #[test]
    fn test_for_url_has_single_arg() {
        let ctx = InvocationContext::for_url("https://b.example");
        assert_eq!(ctx.raw_args().len(), 1);
        assert_eq!(ctx.raw_args()[0], ctx.url());
    }
}
