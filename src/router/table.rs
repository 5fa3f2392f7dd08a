use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub icon: Option<String>,
    /// Left out of navigation menus; still routable.
    pub hidden: bool,
}

/// One route record. Child paths are relative to the parent unless they start with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub name: Option<String>,
    pub component: String,
    pub meta: RouteMeta,
    pub redirect: Option<String>,
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    pub fn new<P: Into<String>, C: Into<String>>(path: P, component: C) -> Self {
        Self {
            path: path.into(),
            name: None,
            component: component.into(),
            meta: RouteMeta::default(),
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn icon<S: Into<String>>(mut self, icon: S) -> Self {
        self.meta.icon = Some(icon.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta.hidden = true;
        self
    }

    pub fn redirect<S: Into<String>>(mut self, to: S) -> Self {
        self.redirect = Some(to.into());
        self
    }

    pub fn children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    /// Swallows the rest of the path, including nothing.
    CatchAll(String),
}

#[derive(Debug, Clone)]
struct Compiled {
    entry: RouteEntry,
    segments: Vec<Segment>,
}

/// A resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: String,
    pub name: Option<String>,
    pub component: String,
    pub meta: RouteMeta,
    pub redirect: Option<String>,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Compiled>,
}

impl RouteTable {
    pub fn new() -> Self { Self::default() }

    /// Register a route and its children. Path syntax: `/static`, `/:param`,
    /// `/:name(.*)*` for catch-all.
    pub fn add(mut self, entry: RouteEntry) -> Self {
        self.push(entry, "");
        self
    }

    fn push(&mut self, mut entry: RouteEntry, parent: &str) {
        entry.path = join(parent, &entry.path);
        let children = std::mem::take(&mut entry.children);
        let base = entry.path.clone();
        let segments = compile(&entry.path);
        self.routes.push(Compiled { entry, segments });
        for child in children {
            self.push(child, &base);
        }
    }

    /// Registered routes with full paths, parents before their children.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().map(|c| &c.entry)
    }

    pub fn len(&self) -> usize { self.routes.len() }

    pub fn is_empty(&self) -> bool { self.routes.is_empty() }

    /// Best match for `path`. Static segments beat params, params beat catch-alls;
    /// ties go to the earlier registration. The query string and fragment are ignored.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = normalize(path);
        let parts: Vec<&str> = split(&path).collect();
        let mut best: Option<(Vec<u8>, &Compiled, BTreeMap<String, String>)> = None;
        for c in &self.routes {
            let Some((score, params)) = match_segments(&c.segments, &parts) else { continue };
            let better = match &best {
                Some((s, _, _)) => score > *s,
                None => true,
            };
            if better {
                best = Some((score, c, params));
            }
        }
        best.map(|(_, c, params)| RouteMatch {
            path: path.clone(),
            name: c.entry.name.clone(),
            component: c.entry.component.clone(),
            meta: c.entry.meta.clone(),
            redirect: c.entry.redirect.clone(),
            params,
        })
    }
}

/// Strip query/fragment, ensure a leading slash, drop a trailing one.
pub(crate) fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn join(parent: &str, path: &str) -> String {
    if path.starts_with('/') || parent.is_empty() {
        normalize(path)
    } else {
        normalize(&format!("{}/{}", parent.trim_end_matches('/'), path))
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn compile(path: &str) -> Vec<Segment> {
    split(path)
        .map(|seg| match seg.strip_prefix(':') {
            Some(rest) => {
                let name_end = rest.find('(').unwrap_or(rest.len());
                let name = rest[..name_end].to_string();
                if rest[name_end..].ends_with('*') {
                    Segment::CatchAll(name)
                } else {
                    Segment::Param(name)
                }
            }
            None => Segment::Static(seg.to_string()),
        })
        .collect()
}

/// Per-segment score (3 static, 2 param, 1 catch-all) so lexicographic comparison
/// prefers the most specific route.
fn match_segments(segments: &[Segment], parts: &[&str]) -> Option<(Vec<u8>, BTreeMap<String, String>)> {
    let mut score = Vec::with_capacity(segments.len());
    let mut params = BTreeMap::new();
    for (i, seg) in segments.iter().enumerate() {
        match seg {
            Segment::CatchAll(name) => {
                let rest: Vec<String> = parts[i.min(parts.len())..].iter().map(|p| decode(p).into_owned()).collect();
                params.insert(name.clone(), rest.join("/"));
                score.push(1);
                return Some((score, params));
            }
            Segment::Static(s) => {
                if parts.get(i) != Some(&s.as_str()) {
                    return None;
                }
                score.push(3);
            }
            Segment::Param(name) => {
                let raw = parts.get(i)?;
                params.insert(name.clone(), decode(raw).into_owned());
                score.push(2);
            }
        }
    }
    if parts.len() != segments.len() {
        return None;
    }
    // full-length match outranks any catch-all
    score.push(4);
    Some((score, params))
}

fn decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
