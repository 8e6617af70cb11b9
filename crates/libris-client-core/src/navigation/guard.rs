use libris_shared::{
    const_config::route::{ROUTE_DASHBOARD, ROUTE_PREFIX_LIBRARIAN, ROUTE_ROOT, ROUTE_SEARCH},
    uac::Role,
};

/// Which paths a rule applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Any path starting with the string, including `/librarianship` for
    /// `/librarian`
    Prefix(&'static str),
    Exact(&'static str),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Prefix(prefix) => path.starts_with(prefix),
            PathPattern::Exact(exact) => path == *exact,
        }
    }
}

/// What the session must have to enter a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Authenticated,
    Role(Role),
}

impl Capability {
    pub fn is_satisfied(&self, role: Option<&Role>, is_authenticated: bool) -> bool {
        match self {
            Capability::Authenticated => is_authenticated,
            Capability::Role(required) => role == Some(required),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub requires: Capability,
}

/// Rules are checked in order and the first matching rule decides
pub static ACCESS_POLICY: &[AccessRule] = &[
    AccessRule {
        pattern: PathPattern::Prefix(ROUTE_PREFIX_LIBRARIAN),
        requires: Capability::Role(Role::Librarian),
    },
    AccessRule {
        pattern: PathPattern::Exact(ROUTE_DASHBOARD),
        requires: Capability::Authenticated,
    },
    AccessRule {
        pattern: PathPattern::Exact(ROUTE_SEARCH),
        requires: Capability::Authenticated,
    },
];

/// Where a denied navigation is sent
pub const REDIRECT_TARGET: &str = ROUTE_ROOT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Checks `path` against [`ACCESS_POLICY`]
pub fn evaluate(path: &str, role: Option<&Role>, is_authenticated: bool) -> GuardDecision {
    evaluate_with(ACCESS_POLICY, path, role, is_authenticated)
}

/// Checks `path` against `policy`. Paths no rule matches are allowed.
pub fn evaluate_with(
    policy: &[AccessRule],
    path: &str,
    role: Option<&Role>,
    is_authenticated: bool,
) -> GuardDecision {
    match policy.iter().find(|rule| rule.pattern.matches(path)) {
        Some(rule) if !rule.requires.is_satisfied(role, is_authenticated) => {
            GuardDecision::Redirect(REDIRECT_TARGET)
        }
        _ => GuardDecision::Allow,
    }
}
