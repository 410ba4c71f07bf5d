use serde::Deserialize;

/// Cross-origin access for browser callers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// `"*"` or a list of origins
    #[serde(default)]
    pub origins: AllowedOrigins,
    /// Preflight cache lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

/// Origins allowed to call the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OriginsRepr")]
pub enum AllowedOrigins {
    /// Any origin
    #[default]
    Any,
    /// Explicit origins such as `https://tryon.example.com`
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginsRepr {
    One(String),
    Many(Vec<String>),
}

impl From<OriginsRepr> for AllowedOrigins {
    fn from(repr: OriginsRepr) -> Self {
        let origins = match repr {
            OriginsRepr::One(origin) => vec![origin],
            OriginsRepr::Many(origins) => origins,
        };

        if origins.iter().any(|origin| origin == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}
