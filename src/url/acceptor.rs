use crate::config::SeekerConfig;

/// How a rule compares a link against its patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Link starts with a pattern
    Prefix,
    /// Link ends with a pattern
    Suffix,
    /// Link contains a pattern
    Contained,
}

impl MatchKind {
    /// Returns true if `link` matches any of the patterns
    fn matches_any(&self, link: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| match self {
            Self::Prefix => link.starts_with(pattern.as_str()),
            Self::Suffix => link.ends_with(pattern.as_str()),
            Self::Contained => link.contains(pattern.as_str()),
        })
    }
}

/// A single link rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRule {
    /// Accept only links matching one of the patterns
    Include {
        kind: MatchKind,
        patterns: Vec<String>,
    },

    /// Reject links matching any of the patterns
    Exclude {
        kind: MatchKind,
        patterns: Vec<String>,
    },
}

impl LinkRule {
    pub fn accepts(&self, link: &str) -> bool {
        match self {
            Self::Include { kind, patterns } => kind.matches_any(link, patterns),
            Self::Exclude { kind, patterns } => !kind.matches_any(link, patterns),
        }
    }
}

/// Decides whether a discovered link may be queued
///
/// A link is accepted only if every rule accepts it. With no rules, every
/// link is accepted.
///
/// # Examples
///
/// ```
/// use dead_seeker::url::LinkAcceptor;
///
/// let acceptor = LinkAcceptor::builder()
///     .include_prefix(["https://example.com"])
///     .exclude_suffix([".pdf"])
///     .build();
///
/// assert!(acceptor.accepts("https://example.com/about.html"));
/// assert!(!acceptor.accepts("https://example.com/manual.pdf"));
/// assert!(!acceptor.accepts("https://other.org/"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAcceptor {
    rules: Vec<LinkRule>,
}

impl LinkAcceptor {
    /// An acceptor with no rules
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn builder() -> LinkAcceptorBuilder {
        LinkAcceptorBuilder::default()
    }

    /// Builds the acceptor described by the include/exclude lists of a config
    pub fn from_config(config: &SeekerConfig) -> Self {
        Self::builder()
            .include_prefix(&config.include_prefix)
            .exclude_prefix(&config.exclude_prefix)
            .include_suffix(&config.include_suffix)
            .exclude_suffix(&config.exclude_suffix)
            .include_contained(&config.include_contained)
            .exclude_contained(&config.exclude_contained)
            .build()
    }

    pub fn accepts(&self, link: &str) -> bool {
        self.rules.iter().all(|rule| rule.accepts(link))
    }

    pub fn rules(&self) -> &[LinkRule] {
        &self.rules
    }
}

/// Builder composing link rules into a [`LinkAcceptor`]
///
/// Each method adds one rule; an empty pattern list adds nothing.
#[derive(Debug, Default)]
pub struct LinkAcceptorBuilder {
    rules: Vec<LinkRule>,
}

impl LinkAcceptorBuilder {
    pub fn include_prefix<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include(MatchKind::Prefix, patterns)
    }

    pub fn exclude_prefix<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude(MatchKind::Prefix, patterns)
    }

    pub fn include_suffix<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include(MatchKind::Suffix, patterns)
    }

    pub fn exclude_suffix<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude(MatchKind::Suffix, patterns)
    }

    pub fn include_contained<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include(MatchKind::Contained, patterns)
    }

    pub fn exclude_contained<I, S>(self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude(MatchKind::Contained, patterns)
    }

    /// Adds an include rule of the given kind
    pub fn include<I, S>(mut self, kind: MatchKind, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = collect_patterns(patterns);
        if !patterns.is_empty() {
            self.rules.push(LinkRule::Include { kind, patterns });
        }
        self
    }

    /// Adds an exclude rule of the given kind
    pub fn exclude<I, S>(mut self, kind: MatchKind, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = collect_patterns(patterns);
        if !patterns.is_empty() {
            self.rules.push(LinkRule::Exclude { kind, patterns });
        }
        self
    }

    pub fn build(self) -> LinkAcceptor {
        LinkAcceptor { rules: self.rules }
    }
}

fn collect_patterns<I, S>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect()
}
