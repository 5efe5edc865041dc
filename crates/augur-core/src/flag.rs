//! Resolution of the `useReasoningV1` pipeline switch.
//!
//! Two sources are consulted in order, first present value wins:
//!
//! 1. the `useReasoningV1` query-string parameter, `true` only on an exact
//!    `"true"` match;
//! 2. the `USE_REASONING_V1` value, taken from the build environment when it
//!    was set at compile time and from the process environment otherwise,
//!    `true` when it lower-cases to `"true"`.
//!
//! With neither present the flag is `false`. Nothing is cached; every call
//! reads the sources again.

use std::collections::HashMap;
use std::env;

use tracing::debug;
use url::form_urlencoded;

/// Query-string parameter name.
pub const QUERY_PARAM: &str = "useReasoningV1";

/// Environment variable name.
pub const ENV_VAR: &str = "USE_REASONING_V1";

/// CGI-style variable holding the ambient query string.
pub const QUERY_STRING_VAR: &str = "QUERY_STRING";

/// [`ENV_VAR`] as set when this crate was compiled.
const BUILD_ENV: Option<&str> = option_env!("USE_REASONING_V1");

/// Raw values of the two flag sources, before precedence is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSources {
    pub query: Option<String>,
    pub env: Option<String>,
}

impl FlagSources {
    /// Read both sources from the current process state.
    pub fn ambient() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read both sources through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// The query source is the `useReasoningV1` parameter of the
    /// [`QUERY_STRING_VAR`] value. The env source is the value of [`ENV_VAR`]
    /// baked in at build time, if any, else `lookup(ENV_VAR)`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_lookup_with_build_env(BUILD_ENV, lookup)
    }

    fn from_lookup_with_build_env(
        build_env: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let query = lookup(QUERY_STRING_VAR).and_then(|qs| query_param(&qs, QUERY_PARAM));
        let env = build_env
            .map(str::to_string)
            .or_else(|| lookup(ENV_VAR));
        Self { query, env }
    }

    /// Take both sources from an explicit map keyed by [`QUERY_PARAM`] and
    /// [`ENV_VAR`]. Ambient state is not consulted.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        Self {
            query: overrides.get(QUERY_PARAM).cloned(),
            env: overrides.get(ENV_VAR).cloned(),
        }
    }

    /// Replace the query source with the `useReasoningV1` value of `qs`.
    ///
    /// A query string without the parameter clears the query source.
    pub fn with_query_string(mut self, qs: &str) -> Self {
        self.query = query_param(qs, QUERY_PARAM);
        self
    }

    /// Apply precedence: query, then environment, then `false`.
    pub fn resolve(&self) -> bool {
        if let Some(q) = &self.query {
            let on = q == "true";
            debug!(source = "query", value = %q, on, "resolved reasoning v1 flag");
            return on;
        }
        if let Some(e) = &self.env {
            let on = e.to_lowercase() == "true";
            debug!(source = "env", value = %e, on, "resolved reasoning v1 flag");
            return on;
        }
        debug!(source = "default", on = false, "resolved reasoning v1 flag");
        false
    }
}

/// Whether the reasoning v1 pipeline is active.
///
/// `None` reads the ambient sources; `Some(map)` resolves from the map alone.
pub fn use_reasoning_v1(overrides: Option<&HashMap<String, String>>) -> bool {
    match overrides {
        Some(map) => FlagSources::from_overrides(map).resolve(),
        None => FlagSources::ambient().resolve(),
    }
}

/// First value of `key` in a URL query string. A leading `?` is ignored.
pub fn query_param(qs: &str, key: &str) -> Option<String> {
    let qs = qs.strip_prefix('?').unwrap_or(qs);
    form_urlencoded::parse(qs.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
