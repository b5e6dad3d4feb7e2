// String validators

use crate::{FromParams, report};
use dynamodel_core::params::{self, Params};
use dynamodel_core::value::{self, Value};
use dynamodel_core::{Model, ModelError, Result, Validator, ValidatorOptions};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::trace;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_HOST_REGEX: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^(([A-Z0-9][A-Z0-9_-]*)(\.[A-Z0-9][A-Z0-9_-]*)+)")
        .case_insensitive(true)
        .build()
        .unwrap()
});

static NAMED_EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@<>]*<([^<>]+)>$").unwrap());

const EMAIL_MAX_LENGTH: usize = 254;
const URL_MAX_LENGTH: usize = 2000;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ModelError::configuration(format!("invalid pattern '{}': {}", pattern, e)))
}

/// Checks the length of a string attribute, counted in characters.
///
/// Parameters: `min`, `max`, `is`, `tooShort`, `tooLong`, `allowEmpty`.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    options: ValidatorOptions,
    /// Minimum length in characters
    pub min: Option<usize>,
    /// Maximum length in characters
    pub max: Option<usize>,
    /// Exact length in characters
    pub is: Option<usize>,
    /// Message used when shorter than `min`
    pub too_short: Option<String>,
    /// Message used when longer than `max`
    pub too_long: Option<String>,
    /// Skip empty values
    pub allow_empty: bool,
}

impl LengthValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "length";

    /// Create a validator without length bounds
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            min: None,
            max: None,
            is: None,
            too_short: None,
            too_long: None,
            allow_empty: true,
        }
    }

    /// Set the minimum length
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the maximum length
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Require an exact length
    pub fn is(mut self, length: usize) -> Self {
        self.is = Some(length);
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }
}

impl FromParams for LengthValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let mut validator = Self::new(options);
        validator.min = params::take_usize(params, "min")?;
        validator.max = params::take_usize(params, "max")?;
        validator.is = params::take_usize(params, "is")?;
        validator.too_short = params::take_string(params, "tooShort")?;
        validator.too_long = params::take_string(params, "tooLong")?;
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for LengthValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let current = model.get(attribute)?;
        if self.allow_empty && value::is_empty(&current, false) {
            return Ok(());
        }
        let Some(text) = value::as_text(&current) else {
            report(self, model, attribute, None, "{attribute} is invalid.", &[]);
            return Ok(());
        };

        let length = text.chars().count();
        if let Some(min) = self.min
            && length < min
        {
            report(
                self,
                model,
                attribute,
                self.too_short.as_deref(),
                "{attribute} is too short (minimum is {min} characters).",
                &[("min", min.to_string())],
            );
        }
        if let Some(max) = self.max
            && length > max
        {
            report(
                self,
                model,
                attribute,
                self.too_long.as_deref(),
                "{attribute} is too long (maximum is {max} characters).",
                &[("max", max.to_string())],
            );
        }
        if let Some(is) = self.is
            && length != is
        {
            report(
                self,
                model,
                attribute,
                None,
                "{attribute} is of the wrong length (should be {length} characters).",
                &[("length", is.to_string())],
            );
        }
        Ok(())
    }
}

/// Checks that an attribute is an email address.
///
/// Parameters: `pattern`, `allowName`, `allowEmpty`.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    options: ValidatorOptions,
    pattern: Option<Regex>,
    /// Accept `Name <address>` forms
    pub allow_name: bool,
    /// Skip empty values
    pub allow_empty: bool,
}

impl EmailValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "email";

    /// Create a validator using the built-in address pattern
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            pattern: None,
            allow_name: false,
            allow_empty: true,
        }
    }

    /// Replace the address pattern
    pub fn pattern(mut self, pattern: &str) -> Result<Self> {
        self.pattern = Some(compile(pattern)?);
        Ok(self)
    }

    /// Accept `Name <address>` forms
    pub fn allow_name(mut self, allow: bool) -> Self {
        self.allow_name = allow;
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Check a single address
    pub fn is_valid(&self, text: &str) -> bool {
        if text.len() > EMAIL_MAX_LENGTH {
            return false;
        }
        let pattern = self.pattern.as_ref().unwrap_or(&*EMAIL_REGEX);
        if pattern.is_match(text) {
            return true;
        }
        self.allow_name
            && NAMED_EMAIL_REGEX
                .captures(text)
                .and_then(|c| c.get(1))
                .is_some_and(|address| pattern.is_match(address.as_str()))
    }
}

impl FromParams for EmailValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let mut validator = Self::new(options);
        if let Some(pattern) = params::take_string(params, "pattern")? {
            validator = validator.pattern(&pattern)?;
        }
        if let Some(allow) = params::take_bool(params, "allowName")? {
            validator.allow_name = allow;
        }
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for EmailValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let current = model.get(attribute)?;
        if self.allow_empty && value::is_empty(&current, false) {
            return Ok(());
        }
        let valid = matches!(&current, Value::String(text) if self.is_valid(text));
        if !valid {
            report(
                self,
                model,
                attribute,
                None,
                "{attribute} is not a valid email address.",
                &[],
            );
        }
        Ok(())
    }
}

/// Checks that an attribute is an absolute URL.
///
/// Parameters: `validSchemes` (default `http,https`), `defaultScheme`,
/// `allowEmpty`. With a default scheme, a scheme-less value is accepted and
/// rewritten with the scheme prepended.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    options: ValidatorOptions,
    /// Accepted URL schemes
    pub valid_schemes: Vec<String>,
    /// Scheme prepended to values without one
    pub default_scheme: Option<String>,
    /// Skip empty values
    pub allow_empty: bool,
}

impl UrlValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "url";

    /// Create a validator accepting http and https URLs
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            valid_schemes: vec!["http".to_string(), "https".to_string()],
            default_scheme: None,
            allow_empty: true,
        }
    }

    /// Restrict the accepted schemes
    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Prepend `scheme` to values without one
    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = Some(scheme.into());
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Normalised URL when `text` is valid
    pub fn check(&self, text: &str) -> Option<String> {
        let candidate = match &self.default_scheme {
            Some(scheme) if !text.contains("://") => format!("{}://{}", scheme, text),
            _ => text.to_string(),
        };
        if candidate.len() > URL_MAX_LENGTH {
            return None;
        }
        let (scheme, rest) = candidate.split_once("://")?;
        let known = self
            .valid_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme));
        (known && URL_HOST_REGEX.is_match(rest)).then_some(candidate)
    }
}

impl FromParams for UrlValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let mut validator = match params::take_string_list(params, "validSchemes")? {
            Some(schemes) if schemes.is_empty() => {
                return Err(ModelError::configuration(
                    "parameter 'validSchemes' must not be empty",
                ));
            }
            Some(schemes) => Self::new(options).schemes(schemes),
            None => Self::new(options),
        };
        validator.default_scheme = params::take_string(params, "defaultScheme")?;
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for UrlValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let current = model.get(attribute)?;
        if self.allow_empty && value::is_empty(&current, false) {
            return Ok(());
        }
        let checked = match &current {
            Value::String(text) => self.check(text),
            _ => None,
        };
        match checked {
            Some(url) if current.as_str() != Some(url.as_str()) => {
                trace!(attribute = %attribute, url = %url, "Prepended default URL scheme");
                model.set(attribute, Value::String(url))?;
            }
            Some(_) => {}
            None => report(self, model, attribute, None, "{attribute} is not a valid URL.", &[]),
        }
        Ok(())
    }
}

/// Checks an attribute against a regular expression.
///
/// Parameters: `pattern` (required), `not`, `allowEmpty`.
#[derive(Debug, Clone)]
pub struct MatchValidator {
    options: ValidatorOptions,
    pattern: Regex,
    /// Fail when the pattern matches instead of when it does not
    pub not: bool,
    /// Skip empty values
    pub allow_empty: bool,
}

impl MatchValidator {
    /// Catalogue kind name
    pub const KIND: &'static str = "match";

    /// Create a validator requiring `pattern` to match
    pub fn new(options: ValidatorOptions, pattern: &str) -> Result<Self> {
        Ok(Self {
            options,
            pattern: compile(pattern)?,
            not: false,
            allow_empty: true,
        })
    }

    /// Invert the check
    pub fn not(mut self, not: bool) -> Self {
        self.not = not;
        self
    }

    /// Skip empty values
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Source of the compiled pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl FromParams for MatchValidator {
    fn from_params(options: ValidatorOptions, params: &mut Params) -> Result<Self> {
        let pattern = params::take_string(params, "pattern")?
            .ok_or_else(|| ModelError::configuration("the \"pattern\" parameter is required"))?;
        let mut validator = Self::new(options, &pattern)?;
        if let Some(not) = params::take_bool(params, "not")? {
            validator.not = not;
        }
        if let Some(allow) = params::take_bool(params, "allowEmpty")? {
            validator.allow_empty = allow;
        }
        Ok(validator)
    }
}

impl Validator for MatchValidator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn validate_attribute(&self, model: &mut dyn Model, attribute: &str) -> Result<()> {
        let current = model.get(attribute)?;
        if self.allow_empty && value::is_empty(&current, false) {
            return Ok(());
        }
        let valid = match &current {
            Value::Array(_) | Value::Object(_) => false,
            other => value::as_text(other)
                .is_some_and(|text| self.pattern.is_match(&text) != self.not),
        };
        if !valid {
            report(self, model, attribute, None, "{attribute} is invalid.", &[]);
        }
        Ok(())
    }
}
