use crate::error::Result;
use crate::introspect::namespace;
use regex::Regex;

/// What to do when an accessor fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemberErrorPolicy {
    /// Leave the member out and keep going
    #[default]
    Omit,
    /// Abort the whole call with [`Error::Member`](crate::Error::Member)
    Fail,
}

/// Rule an element or attribute name has to satisfy
#[derive(Clone, Debug, Default)]
pub enum NamePattern {
    /// One or more ASCII letters or digits
    #[default]
    Alphanumeric,
    Custom(Regex),
}

impl NamePattern {
    pub fn matches(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self {
            Self::Alphanumeric => name.bytes().all(|b| b.is_ascii_alphanumeric()),
            Self::Custom(regex) => regex.is_match(name),
        }
    }
}

/// Traversal configuration shared by both façades
#[derive(Clone, Debug)]
pub struct Config {
    /// Accessors must start with this prefix; the rest becomes the member name
    pub accessor_prefix: String,
    /// Accessor that never counts as a member
    pub identity_accessor: String,
    /// Types whose path starts with one of these segments are emitted via `display`
    pub trusted_namespaces: Vec<String>,
    pub name_pattern: NamePattern,
    pub on_member_error: MemberErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accessor_prefix: "get".to_string(),
            identity_accessor: "getClass".to_string(),
            trusted_namespaces: vec!["std".to_string(), "core".to_string(), "alloc".to_string()],
            name_pattern: NamePattern::Alphanumeric,
            on_member_error: MemberErrorPolicy::Omit,
        }
    }
}

impl Config {
    /// Default configuration, but any accessor failure aborts the call
    pub fn strict() -> Self {
        Self::default().with_member_errors(MemberErrorPolicy::Fail)
    }

    pub fn with_member_errors(mut self, policy: MemberErrorPolicy) -> Self {
        self.on_member_error = policy;
        self
    }

    pub fn with_trusted_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.trusted_namespaces.push(namespace.into());
        self
    }

    pub fn with_accessor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.accessor_prefix = prefix.into();
        self
    }

    /// Replaces the name rule with a regular expression
    pub fn with_name_pattern(mut self, pattern: &str) -> Result<Self> {
        self.name_pattern = NamePattern::Custom(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn is_valid_name(&self, name: &str) -> bool {
        self.name_pattern.matches(name)
    }

    pub fn is_trusted(&self, type_path: &str) -> bool {
        let namespace = namespace(type_path);
        self.trusted_namespaces.iter().any(|ns| ns == namespace)
    }

    /// Member name for a conforming accessor, `None` for anything else
    ///
    /// `getName` becomes `name`; `getClass` and a bare `get` are rejected.
    pub fn member_name(&self, accessor: &str) -> Option<String> {
        if accessor == self.identity_accessor {
            return None;
        }
        accessor
            .strip_prefix(self.accessor_prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .map(str::to_lowercase)
    }
}
