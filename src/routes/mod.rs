//! Route table for the storefront client. Destinations are declared once,
//! at startup, and never change: two protected subtrees (buyer and
//! merchant) plus the public login page. The table is consulted by the
//! navigator on every attempt; rendering the destinations is someone
//! else's job.

use crate::session::Role;

pub const LOGIN_PATH: &str = "/login";

/// Static per-destination metadata consumed by the guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// When set, only a session holding this role may enter.
    pub role: Option<Role>,
}

/// One declared destination. Child paths are relative to their parent.
///
/// A declared `meta` applies to the route and everything nested beneath it,
/// until a deeper route declares its own: that one overrides `requires_auth`
/// outright and `role` only when it names one.
#[derive(Clone, Debug)]
pub struct Route {
    path: String,
    meta: Option<RouteMeta>,
    redirect: Option<String>,
    children: Vec<Route>,
}

impl Route {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            meta: None,
            redirect: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    #[must_use]
    pub fn redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: Route) -> Self {
        self.children.push(child);
        self
    }
}

/// A resolved navigation target: absolute path, effective meta, and the
/// route-level redirect to follow instead, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub path: String,
    pub meta: RouteMeta,
    pub redirect: Option<String>,
}

/// Ordered collection of destinations, flattened at construction so that
/// lookups during navigation stay allocation-free.
pub struct RouteTable {
    flat: Vec<ResolvedRoute>,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        let mut flat = Vec::new();
        for route in &routes {
            flatten(route, "", RouteMeta::default(), &mut flat);
        }
        Self { flat }
    }

    /// Look up a destination by absolute path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&ResolvedRoute> {
        self.flat.iter().find(|route| route.path == path)
    }
}

fn flatten(route: &Route, parent_path: &str, inherited: RouteMeta, out: &mut Vec<ResolvedRoute>) {
    let path = join_paths(parent_path, &route.path);

    let mut meta = inherited;
    if let Some(declared) = route.meta {
        meta.requires_auth = declared.requires_auth;
        if declared.role.is_some() {
            meta.role = declared.role;
        }
    }

    out.push(ResolvedRoute {
        path: path.clone(),
        meta,
        redirect: route.redirect.clone(),
    });

    for child in &route.children {
        flatten(child, &path, meta, out);
    }
}

fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        child.to_string()
    } else if parent.is_empty() || parent == "/" {
        format!("/{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// The storefront's navigable destinations: the public login page and the
/// two role-gated subtrees, each with its own landing redirect.
#[must_use]
pub fn storefront_routes() -> RouteTable {
    RouteTable::new(vec![
        Route::new("/").redirect(LOGIN_PATH),
        Route::new(LOGIN_PATH).meta(RouteMeta {
            requires_auth: false,
            role: None,
        }),
        Route::new("/user")
            .meta(RouteMeta {
                requires_auth: true,
                role: Some(Role::User),
            })
            .redirect("/user/products")
            .child(Route::new("products"))
            .child(Route::new("recommendations"))
            .child(Route::new("orders")),
        Route::new("/merchant")
            .meta(RouteMeta {
                requires_auth: true,
                role: Some(Role::Merchant),
            })
            .redirect("/merchant/dashboard")
            .child(Route::new("dashboard"))
            .child(Route::new("products"))
            .child(Route::new("orders")),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn login_page_is_public() {
        let table = storefront_routes();
        let login = table.resolve(LOGIN_PATH).unwrap();
        assert!(!login.meta.requires_auth);
        assert_eq!(login.meta.role, None);
    }

    #[test]
    fn children_inherit_the_subtree_meta() {
        let table = storefront_routes();
        for path in ["/user/products", "/user/recommendations", "/user/orders"] {
            let route = table.resolve(path).unwrap();
            assert!(route.meta.requires_auth, "{path} should require auth");
            assert_eq!(route.meta.role, Some(Role::User), "{path} should be buyer-gated");
        }
        for path in ["/merchant/dashboard", "/merchant/products", "/merchant/orders"] {
            let route = table.resolve(path).unwrap();
            assert!(route.meta.requires_auth, "{path} should require auth");
            assert_eq!(route.meta.role, Some(Role::Merchant), "{path} should be merchant-gated");
        }
    }

    #[test]
    fn subtree_roots_redirect_to_their_landing_pages() {
        let table = storefront_routes();
        assert_eq!(table.resolve("/").unwrap().redirect.as_deref(), Some(LOGIN_PATH));
        assert_eq!(
            table.resolve("/user").unwrap().redirect.as_deref(),
            Some("/user/products")
        );
        assert_eq!(
            table.resolve("/merchant").unwrap().redirect.as_deref(),
            Some("/merchant/dashboard")
        );
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        let table = storefront_routes();
        assert!(table.resolve("/admin").is_none());
        assert!(table.resolve("/user/products/42").is_none());
        assert!(table.resolve("user/products").is_none());
    }

    #[test]
    fn deeper_meta_overrides_auth_but_keeps_the_role() {
        // A hypothetical public page inside a gated subtree: requires_auth is
        // overridden outright, the inherited role survives untouched.
        let table = RouteTable::new(vec![Route::new("/shop")
            .meta(RouteMeta {
                requires_auth: true,
                role: Some(Role::Merchant),
            })
            .child(Route::new("about").meta(RouteMeta {
                requires_auth: false,
                role: None,
            }))]);

        let about = table.resolve("/shop/about").unwrap();
        assert!(!about.meta.requires_auth);
        assert_eq!(about.meta.role, Some(Role::Merchant));
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("", "/login"), "/login");
        assert_eq!(join_paths("/user", "products"), "/user/products");
        assert_eq!(join_paths("/", "login"), "/login");
        assert_eq!(join_paths("/user", "/merchant"), "/merchant");
    }
}
