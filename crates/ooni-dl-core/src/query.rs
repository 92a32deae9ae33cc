//! Starting listing URL: base endpoint + raw filter fragment + `key:value` pairs.

use std::fmt;
use std::str::FromStr;

/// OONI measurement file listing.
pub const DEFAULT_API_URL: &str = "https://measurements.ooni.torproject.org/api/v1/files?";

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("must use exactly one colon in HTTP GET parameter pairs, got {0:?}")]
    BadPair(String),
    #[error("invalid listing URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// One `key:value` HTTP GET parameter given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamPair {
    pub key: String,
    pub value: String,
}

impl FromStr for ParamPair {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((key, value)) if !key.is_empty() && !value.contains(':') => Ok(ParamPair {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(QueryError::BadPair(s.to_string())),
        }
    }
}

impl fmt::Display for ParamPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Builds the first listing URL.
///
/// `get_arguments` is appended verbatim to `api_url` and the result is
/// normalized by `url` (characters such as spaces get percent-encoded).
/// Parameter pairs, if any, are then form-encoded onto the query string.
pub fn build_start_url(
    api_url: &str,
    get_arguments: &str,
    params: &[ParamPair],
) -> Result<String, QueryError> {
    let raw = format!("{api_url}{get_arguments}");
    let mut parsed = url::Url::parse(&raw).map_err(|source| QueryError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;
    if !params.is_empty() {
        let mut pairs = parsed.query_pairs_mut();
        for p in params {
            pairs.append_pair(&p.key, &p.value);
        }
    }
    Ok(parsed.into())
}
