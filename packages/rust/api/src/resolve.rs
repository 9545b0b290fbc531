//! Resource reference resolution against the configured API base.
//!
//! The backend hands out hypermedia-style resource objects whose canonical
//! location lives in a `_links` self link. Callers address the API either by
//! a raw path (`"teams"`) or by handing such an object back. Both forms
//! resolve to an absolute URL here.

use url::Url;

use slicevote_shared::{Result, SelfLinked, SliceVoteError};

/// Paths ending in this suffix never receive a trailing slash — the backend's
/// OpenAPI document endpoint rejects one. Named exception, not a general rule.
const NO_SLASH_SUFFIX: &str = "api-docs";

// ---------------------------------------------------------------------------
// ResourceRef
// ---------------------------------------------------------------------------

/// A caller-supplied reference to a remote resource.
///
/// Constructed explicitly: [`ResourceRef::path`] for raw paths,
/// [`ResourceRef::resource`] for backend objects carrying a self link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// A raw path, relative to the API base or already absolute.
    Path(String),
    /// The self link extracted from a resource object. `None` when the
    /// object carried no link; resolution then fails with
    /// [`SliceVoteError::InvalidReference`].
    Resource { self_link: Option<String> },
}

impl ResourceRef {
    /// Reference a resource by raw path.
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Reference a resource object by its self link.
    pub fn resource<R: SelfLinked>(resource: &R) -> Self {
        Self::Resource {
            self_link: resource.self_link().map(str::to_owned),
        }
    }

    /// The raw link or path string, or `InvalidReference` for a resource
    /// object that carried no self link.
    fn as_raw(&self) -> Result<&str> {
        match self {
            Self::Path(path) => Ok(path),
            Self::Resource {
                self_link: Some(link),
            } => Ok(link),
            Self::Resource { self_link: None } => Err(SliceVoteError::invalid_reference(
                "resource object carries no self link",
            )),
        }
    }
}

impl From<&str> for ResourceRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a resource reference to an absolute URL against `base`.
///
/// Already-absolute references pass through unchanged (resolution is
/// idempotent). Relative references get the backend's trailing-slash
/// convention applied and are joined with `base` using exactly one `/`,
/// regardless of whether `base` itself ends in a slash.
pub fn resolve(base: &Url, rref: &ResourceRef) -> Result<Url> {
    let raw = rref.as_raw()?;

    if raw.starts_with("http") {
        return Url::parse(raw).map_err(|e| {
            SliceVoteError::invalid_reference(format!("absolute reference {raw:?} is not a URL: {e}"))
        });
    }

    let relative = with_trailing_slash(raw);
    let base_str = base.as_str().trim_end_matches('/');
    let joined = if relative.starts_with('/') {
        format!("{base_str}{relative}")
    } else {
        format!("{base_str}/{relative}")
    };

    Url::parse(&joined).map_err(|e| {
        SliceVoteError::invalid_reference(format!("reference {raw:?} resolved to malformed URL: {e}"))
    })
}

/// Apply the backend's trailing-slash convention to a relative path.
///
/// A `/` is appended unless the path already ends in one, ends in the
/// `api-docs` exception suffix, or its final segment looks file-like
/// (contains a `.` after the last `/`).
fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') || path.ends_with(NO_SLASH_SUFFIX) {
        return path.to_owned();
    }
    let file_like = match (path.rfind('.'), path.rfind('/')) {
        (None, _) => false,
        (Some(dot), Some(slash)) => slash < dot,
        (Some(_), None) => true,
    };
    if file_like {
        path.to_owned()
    } else {
        format!("{path}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicevote_shared::Team;

    fn base() -> Url {
        Url::parse("http://api.example.com/").unwrap()
    }

    #[test]
    fn relative_path_gets_trailing_slash() {
        let url = resolve(&base(), &ResourceRef::path("teams")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/teams/");
    }

    #[test]
    fn existing_trailing_slash_is_kept_single() {
        let url = resolve(&base(), &ResourceRef::path("teams/")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/teams/");
    }

    #[test]
    fn base_trailing_slash_is_irrelevant() {
        let with = Url::parse("http://api.example.com/").unwrap();
        let without = Url::parse("http://api.example.com").unwrap();
        let rref = ResourceRef::path("teams/backend");
        assert_eq!(
            resolve(&with, &rref).unwrap(),
            resolve(&without, &rref).unwrap()
        );
    }

    #[test]
    fn leading_slash_does_not_double_up() {
        let url = resolve(&base(), &ResourceRef::path("/teams")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/teams/");
    }

    #[test]
    fn absolute_reference_passes_through() {
        let url = resolve(&base(), &ResourceRef::path("http://other.example.com/x/")).unwrap();
        assert_eq!(url.as_str(), "http://other.example.com/x/");
    }

    #[test]
    fn resolution_is_idempotent_on_absolute_urls() {
        let first = resolve(&base(), &ResourceRef::path("teams")).unwrap();
        let second = resolve(&base(), &ResourceRef::path(first.as_str())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn api_docs_never_gets_trailing_slash() {
        let url = resolve(&base(), &ResourceRef::path("api-docs")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/api-docs");

        let url = resolve(&base(), &ResourceRef::path("v3/api-docs")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/v3/api-docs");
    }

    #[test]
    fn file_like_segment_gets_no_trailing_slash() {
        let url = resolve(&base(), &ResourceRef::path("docs/openapi.json")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/docs/openapi.json");

        let url = resolve(&base(), &ResourceRef::path("favicon.ico")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/favicon.ico");
    }

    #[test]
    fn dot_in_earlier_segment_still_gets_slash() {
        let url = resolve(&base(), &ResourceRef::path("v1.2/teams")).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/v1.2/teams/");
    }

    #[test]
    fn resource_with_self_link_resolves() {
        let team = Team {
            name: "backend".into(),
            links: Some("teams/backend".into()),
        };
        let url = resolve(&base(), &ResourceRef::resource(&team)).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/teams/backend/");
    }

    #[test]
    fn resource_without_self_link_fails_loudly() {
        let team = Team {
            name: "backend".into(),
            links: None,
        };
        let err = resolve(&base(), &ResourceRef::resource(&team)).unwrap_err();
        assert!(matches!(err, SliceVoteError::InvalidReference { .. }));
    }
}
