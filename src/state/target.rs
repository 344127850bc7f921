//! Crawl targets and their depth budget

use std::fmt;
use std::sync::Arc;

/// Remaining hop budget of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// No depth limit
    Unlimited,

    /// Number of further hops allowed from this target
    Remaining(u32),
}

impl Depth {
    /// Builds a depth from a configured limit; negative means unlimited
    pub fn from_limit(limit: i64) -> Self {
        if limit < 0 {
            Self::Unlimited
        } else {
            Self::Remaining(u32::try_from(limit).unwrap_or(u32::MAX))
        }
    }

    /// Returns true if links found on a target with this depth may be followed
    pub fn can_expand(&self) -> bool {
        !matches!(self, Self::Remaining(0))
    }

    /// Depth of a target discovered one hop away
    pub fn child(&self) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Remaining(n) => Self::Remaining(n.saturating_sub(1)),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => write!(f, "unlimited"),
            Self::Remaining(n) => write!(f, "{}", n),
        }
    }
}

/// An address to fetch
///
/// Targets are immutable. A child target points back at the target that
/// discovered it; the chain only ever runs from child to ancestor, so shared
/// `Arc` links cannot form a cycle.
#[derive(Debug)]
pub struct Target {
    home: String,
    url: String,
    depth: Depth,
    parent: Option<Arc<Target>>,
}

impl Target {
    /// Creates a seed target, which is its own home
    pub fn seed(url: impl Into<String>, depth: Depth) -> Arc<Self> {
        let url = url.into();
        Arc::new(Self {
            home: url.clone(),
            url,
            depth,
            parent: None,
        })
    }

    /// Creates a target for a link discovered on `parent`
    ///
    /// The child inherits the parent's home and has one hop less to go.
    pub fn child(parent: &Arc<Target>, url: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            home: parent.home.clone(),
            url: url.into(),
            depth: parent.depth.child(),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// The seed address this target is scoped to
    pub fn home(&self) -> &str {
        &self.home
    }

    /// The address to fetch
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// The target whose page linked here, if any
    pub fn parent(&self) -> Option<&Arc<Target>> {
        self.parent.as_ref()
    }

    /// Same-origin heuristic: the home address is a substring of the url
    pub fn is_onsite(&self) -> bool {
        self.url.contains(&self.home)
    }

    /// Addresses of all ancestors, from the seed down to the direct parent
    pub fn parent_urls(&self) -> Vec<&str> {
        let mut urls = Vec::new();
        let mut current = self.parent.as_deref();
        while let Some(target) = current {
            urls.push(target.url.as_str());
            current = target.parent.as_deref();
        }
        urls.reverse();
        urls
    }
}
