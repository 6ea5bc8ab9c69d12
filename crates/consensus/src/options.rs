//! String-typed reducer options.
//!
//! Reducers are configured upstream through loosely typed `key=value`
//! pairs (query parameters, CLI flags). [`ReducerOptions`] keeps them as
//! strings and converts them into typed parameter structs, checking every
//! value against the type of the field it sets.

use consensus_core::{ParamsError, SlopeSymmetry};
use consensus_points::PointReducerParams;
use consensus_text::TextReducerParams;
use log::debug;
use std::str::FromStr;

/// Errors raised while turning string options into reducer parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("option `{0}` is not of the form key=value")]
    MalformedPair(String),
    #[error("option `{key}` expects {expected} (got `{value}`)")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Ordered `key=value` options. A key set twice keeps its last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReducerOptions {
    entries: Vec<(String, String)>,
}

impl ReducerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse `key=value` pairs, e.g. the repeated `-O` flags of the CLI.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| OptionsError::MalformedPair(pair.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(OptionsError::MalformedPair(pair.to_string()));
            }
            options.set(key, value.trim());
        }
        Ok(options)
    }

    /// Point reducer parameters: defaults overridden by these options.
    pub fn point_params(&self) -> Result<PointReducerParams, OptionsError> {
        self.apply_points(PointReducerParams::default())
    }

    /// Override fields of `params` and validate the result. Keys the point
    /// reducer does not know are ignored.
    pub fn apply_points(
        &self,
        mut params: PointReducerParams,
    ) -> Result<PointReducerParams, OptionsError> {
        for (key, value) in &self.entries {
            match key.as_str() {
                "eps" => params.eps = parse_float(key, value)?,
                "min_samples" => params.min_samples = parse_count(key, value)?,
                "metric" => params.metric = value.parse()?,
                "algorithm" => params.algorithm = value.parse()?,
                "p" => params.p = parse_optional_float(key, value)?,
                _ => debug!("point reducer ignores option `{key}`"),
            }
        }
        params.validate()?;
        Ok(params)
    }

    /// Text reducer parameters: defaults overridden by these options.
    pub fn text_params(&self) -> Result<TextReducerParams, OptionsError> {
        self.apply_text(TextReducerParams::default())
    }

    /// Override fields of `params` and validate the result. Keys the text
    /// reducer does not know are ignored.
    pub fn apply_text(
        &self,
        mut params: TextReducerParams,
    ) -> Result<TextReducerParams, OptionsError> {
        for (key, value) in &self.entries {
            match key.as_str() {
                "eps_slope" => params.eps_slope = parse_float(key, value)?,
                "eps_line" => params.eps_line = parse_float(key, value)?,
                "eps_word" => params.eps_word = parse_float(key, value)?,
                "eps_gutter" => params.eps_gutter = parse_float(key, value)?,
                "min_samples" => params.min_samples = parse_count(key, value)?,
                "metric" => params.metric = value.parse()?,
                "algorithm" => params.algorithm = value.parse()?,
                "p" => params.p = parse_optional_float(key, value)?,
                "slope_symmetry" => params.slope_symmetry = parse_symmetry(key, value)?,
                _ => debug!("text reducer ignores option `{key}`"),
            }
        }
        params.validate()?;
        Ok(params)
    }
}

impl<K, V> FromIterator<(K, V)> for ReducerOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.set(key, value);
        }
        options
    }
}

fn invalid(key: &str, value: &str, expected: &'static str) -> OptionsError {
    OptionsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn parse_float(key: &str, value: &str) -> Result<f64, OptionsError> {
    f64::from_str(value).map_err(|_| invalid(key, value, "a number"))
}

fn parse_count(key: &str, value: &str) -> Result<usize, OptionsError> {
    usize::from_str(value).map_err(|_| invalid(key, value, "a non-negative integer"))
}

fn parse_optional_float(key: &str, value: &str) -> Result<Option<f64>, OptionsError> {
    match value {
        "" | "None" | "none" | "null" => Ok(None),
        _ => f64::from_str(value)
            .map(Some)
            .map_err(|_| invalid(key, value, "a number or `None`")),
    }
}

fn parse_symmetry(key: &str, value: &str) -> Result<SlopeSymmetry, OptionsError> {
    match value.to_ascii_lowercase().as_str() {
        "axial" => Ok(SlopeSymmetry::Axial),
        "directed" => Ok(SlopeSymmetry::Directed),
        _ => Err(invalid(key, value, "`axial` or `directed`")),
    }
}
