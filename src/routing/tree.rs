//! The application route tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! One table drives the navigation menu, the guard each path needs and the
//! breadcrumb trail. Routes are plain nodes: a path segment (which may span
//! several URL segments, like `auth/login`), a label, an access level and
//! children. An empty segment is a pathless node that matches where its
//! parent does.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use crate::routing::guard::Access;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteNode {
    pub segment: String,
    pub label: String,
    pub icon: Option<String>,
    pub access: Access,
    /// Kept out of navigation menus (redirect aliases, mid-flow pages).
    pub hidden: bool,
    pub redirect_to: Option<String>,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(segment: &str, label: &str) -> Self {
        Self {
            segment: segment.to_owned(),
            label: label.to_owned(),
            icon: None,
            access: Access::Public,
            hidden: false,
            redirect_to: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_owned());
        self
    }

    #[must_use]
    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn redirect(mut self, to: &str) -> Self {
        self.redirect_to = Some(to.to_owned());
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn child(mut self, node: RouteNode) -> Self {
        self.children.push(node);
        self
    }

    /// Whether this node belongs to the sign-in/sign-up menu group.
    #[must_use]
    pub fn is_auth_route(&self) -> bool {
        self.segment.contains("auth")
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        self.segment.split('/').filter(|s| !s.is_empty())
    }
}

/// The storefront's routes.
#[must_use]
pub fn app_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::new("", "Home").icon("pi pi-fw pi-home"),
        RouteNode::new("home", "Home").redirect("/"),
        RouteNode::new("models", "Models").icon("pi pi-fw pi-car"),
        RouteNode::new("lines", "Lines").icon("pi pi-fw pi-list"),
        RouteNode::new("second-hand", "Second Hand").icon("pi pi-fw pi-tag"),
        RouteNode::new("add-product", "Add Product").icon("pi pi-fw pi-plus").access(Access::Admin),
        RouteNode::new("dashboard", "Dashboard").icon("pi pi-fw pi-th-large").access(Access::Admin),
        RouteNode::new("auth/login", "Login").icon("pi pi-fw pi-sign-in"),
        RouteNode::new("auth/register", "Register").icon("pi pi-fw pi-user-plus"),
        RouteNode::new("auth/logout", "Logout").icon("pi pi-fw pi-sign-out"),
        RouteNode::new("auth/password-reset-request", "Forgot Password").hidden(),
        RouteNode::new("auth/validate-reset-token", "Validate Reset Token").hidden(),
        RouteNode::new("auth/reset-password", "Reset Password").hidden(),
    ]
}

/// A node together with its full URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatRoute<'a> {
    pub path: String,
    pub node: &'a RouteNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    pub url: String,
}

/// Every node depth-first, parents before children.
#[must_use]
pub fn flatten(routes: &[RouteNode]) -> Vec<FlatRoute<'_>> {
    let mut out = Vec::new();
    flatten_into(routes, "", &mut out);
    out
}

fn flatten_into<'a>(routes: &'a [RouteNode], base: &str, out: &mut Vec<FlatRoute<'a>>) {
    for node in routes {
        let path = join(base, node);
        out.push(FlatRoute { path: if path.is_empty() { "/".to_owned() } else { path.clone() }, node });
        flatten_into(&node.children, &path, out);
    }
}

fn join(base: &str, node: &RouteNode) -> String {
    node.parts().fold(base.to_owned(), |mut url, part| {
        url.push('/');
        url.push_str(part);
        url
    })
}

/// URL segments of `path`, ignoring query, fragment and empty segments.
fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// The single chain of nodes matching `path`, root first, each with the URL
/// accumulated up to it. `None` when nothing matches.
#[must_use]
pub fn active_chain<'a>(routes: &'a [RouteNode], path: &str) -> Option<Vec<(&'a RouteNode, String)>> {
    match_chain(routes, &split_path(path), "")
}

fn match_chain<'a>(routes: &'a [RouteNode], remaining: &[&str], base: &str) -> Option<Vec<(&'a RouteNode, String)>> {
    for node in routes {
        let parts: Vec<&str> = node.parts().collect();
        if !remaining.starts_with(&parts) {
            continue;
        }
        let rest = &remaining[parts.len()..];
        let url = join(base, node);

        if rest.is_empty() && node.children.is_empty() {
            return Some(vec![(node, url)]);
        }
        if let Some(mut tail) = match_chain(&node.children, rest, &url) {
            tail.insert(0, (node, url));
            return Some(tail);
        }
        if rest.is_empty() {
            return Some(vec![(node, url)]);
        }
    }
    None
}

/// The node rendered at `path`.
#[must_use]
pub fn find<'a>(routes: &'a [RouteNode], path: &str) -> Option<&'a RouteNode> {
    active_chain(routes, path).and_then(|chain| chain.last().map(|(node, _)| *node))
}

/// The strictest access level along the chain for `path`. Unknown paths are
/// public; the router renders its not-found page for them.
#[must_use]
pub fn access_for(routes: &[RouteNode], path: &str) -> Access {
    active_chain(routes, path)
        .and_then(|chain| chain.iter().map(|(node, _)| node.access).max())
        .unwrap_or_default()
}

/// Visible top-level items split into (site menu, auth menu).
#[must_use]
pub fn menu_items(routes: &[RouteNode]) -> (Vec<&RouteNode>, Vec<&RouteNode>) {
    routes.iter().filter(|node| !node.hidden).partition(|node| !node.is_auth_route())
}

/// Breadcrumb trail for `path`. Home and pathless nodes are skipped.
#[must_use]
pub fn breadcrumbs(routes: &[RouteNode], path: &str) -> Vec<Breadcrumb> {
    let Some(chain) = active_chain(routes, path) else {
        return Vec::new();
    };
    chain
        .into_iter()
        .filter(|(node, _)| !node.segment.is_empty() && node.label != "Home")
        .map(|(node, url)| Breadcrumb { label: node.label.clone(), url })
        .collect()
}
