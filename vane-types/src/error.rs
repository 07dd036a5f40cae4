use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the vane workspace.
///
/// Transport failures (`Timeout`, `Network`, `Http`) and payload failures
/// (`Parse`, `Validation`) are tagged with the connector that produced them.
/// `Exhausted` is the terminal state of a fallback chain and keeps every
/// attempt's error in order.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VaneError {
    /// The call exceeded its deadline and was cancelled.
    #[error("{connector} timed out after {timeout_ms}ms")]
    Timeout {
        /// Connector name that timed out.
        connector: String,
        /// Deadline that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// Transport failure: DNS, TLS, refused connection, truncated body.
    #[error("{connector} network error: {msg}")]
    Network {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status} from {connector}")]
    Http {
        /// Connector name that answered.
        connector: String,
        /// Status code returned by the upstream.
        status: u16,
    },

    /// The payload did not have the expected shape.
    #[error("{connector} returned an unexpected payload: {msg}")]
    Parse {
        /// Connector name whose payload could not be parsed.
        connector: String,
        /// Description of what was wrong.
        msg: String,
    },

    /// The payload parsed but its values are implausible (e.g. non-positive price).
    #[error("{connector} returned implausible data: {msg}")]
    Validation {
        /// Connector name whose data was rejected.
        connector: String,
        /// Description of the rejected value.
        msg: String,
    },

    /// Every source in a fallback list failed for one query.
    #[error("no data available for {what}: {}", last_message(.errors))]
    Exhausted {
        /// Capability label (e.g. "quote", "weather").
        capability: String,
        /// What was being resolved, e.g. "quote for ^DJI".
        what: String,
        /// Attempt errors in the order the sources were tried.
        errors: Vec<VaneError>,
    },

    /// No registered connector offers the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label that has no provider.
        capability: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

fn last_message(errors: &[VaneError]) -> String {
    errors
        .last()
        .map_or_else(|| "no sources attempted".to_string(), ToString::to_string)
}

impl VaneError {
    /// Helper: build a `Timeout` error.
    pub fn timeout(connector: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::Timeout {
            connector: connector.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Helper: build a `Network` error.
    pub fn network(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Network {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Http` error.
    pub fn http(connector: impl Into<String>, status: u16) -> Self {
        Self::Http {
            connector: connector.into(),
            status,
        }
    }

    /// Helper: build a `Parse` error.
    pub fn parse(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Validation` error.
    pub fn validation(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability label.
    #[must_use]
    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }

    /// Helper: build an `Exhausted` error from the collected attempt errors.
    pub fn exhausted(
        capability: impl Into<String>,
        what: impl Into<String>,
        errors: Vec<Self>,
    ) -> Self {
        Self::Exhausted {
            capability: capability.into(),
            what: what.into(),
            errors,
        }
    }

    /// True for deadline failures.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// True for errors confined to one item of a payload (bad row, implausible value).
    ///
    /// Item-level errors never abort sibling items in the same batch.
    #[must_use]
    pub const fn is_item_level(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Validation { .. })
    }

    /// The last underlying error of an `Exhausted` chain, or `self` otherwise.
    #[must_use]
    pub fn last_cause(&self) -> &Self {
        match self {
            Self::Exhausted { errors, .. } => errors.last().map_or(self, Self::last_cause),
            other => other,
        }
    }

    /// Flatten nested `Exhausted` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::Exhausted { errors, .. } => errors.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_message_uses_last_error() {
        let e = VaneError::exhausted(
            "weather",
            "weather for 31.23,121.47",
            vec![
                VaneError::http("open-meteo", 503),
                VaneError::network("wttr", "connection refused"),
            ],
        );
        assert_eq!(
            e.to_string(),
            "no data available for weather for 31.23,121.47: wttr network error: connection refused"
        );
        assert_eq!(e.last_cause(), &VaneError::network("wttr", "connection refused"));
    }

    #[test]
    fn exhausted_without_attempts_still_renders() {
        let e = VaneError::exhausted("quote", "quote for X", vec![]);
        assert_eq!(e.to_string(), "no data available for quote for X: no sources attempted");
    }

    #[test]
    fn only_payload_errors_are_item_level() {
        assert!(VaneError::parse("sina", "short row").is_item_level());
        assert!(VaneError::validation("yahoo", "price 0").is_item_level());
        assert!(!VaneError::http("sina", 503).is_item_level());
        assert!(!VaneError::timeout("sina", std::time::Duration::from_secs(1)).is_item_level());
        assert!(!VaneError::exhausted("quote", "X", vec![]).is_item_level());
    }

    #[test]
    fn flatten_unwraps_nested_chains() {
        let inner = VaneError::exhausted("quote", "a", vec![VaneError::http("a", 500)]);
        let outer = VaneError::exhausted(
            "quote",
            "b",
            vec![inner, VaneError::parse("b", "short row")],
        );
        let flat = outer.flatten();
        assert_eq!(flat.len(), 2);
        assert!(flat[1].is_item_level());
    }
}
