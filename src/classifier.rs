//! Resource grouping of declared path patterns.
//!
//! Every declared pattern is inserted into a tree keyed by path segment. A
//! pattern whose first segment below its nearest declared ancestor is a
//! path parameter (`/users` -> `/users/{id}`) joins that ancestor's resource
//! group; every other pattern starts a group of its own. Groups come back
//! ordered by their earliest declared member, members ordered by their own
//! declaration index, so the result does not depend on how the document
//! interleaves unrelated paths.

use crate::document::PathItem;
use indexmap::IndexMap;
use log::debug;

/// One `/`-separated piece of a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text, e.g. `users`
    Literal(String),
    /// Template parameter, e.g. `{id}` (stored without braces)
    Param(String),
}

impl Segment {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

/// Splits a URL template into segments, ignoring empty ones.
pub fn split_segments(pattern: &str) -> Vec<Segment> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(Segment::parse)
        .collect()
}

/// Last non-empty segment of the pattern, verbatim (`""` for `/`).
pub fn base_segment(pattern: &str) -> &str {
    pattern.split('/').filter(|s| !s.is_empty()).last().unwrap_or("")
}

/// Segments leading up to the base segment, verbatim.
pub fn parent_segments(pattern: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();
    segments
}

/// The name a pattern contributes to file naming and handler signatures.
///
/// A literal base segment is returned unchanged. A bracketed one resolves to
/// the path parameter the path item declares under that name, or to an empty
/// string when there is no such declaration.
pub fn effective_name(pattern: &str, item: &PathItem) -> String {
    match Segment::parse(base_segment(pattern)) {
        Segment::Literal(text) => text,
        Segment::Param(name) => item
            .path_parameter(&name)
            .map(|p| p.name.clone())
            .unwrap_or_default(),
    }
}

/// A pattern as declared in the document.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredPath<'a> {
    /// Position in the document's `paths` mapping
    pub index: usize,
    pub pattern: &'a str,
    pub item: &'a PathItem,
}

/// Patterns that collapse into a single output unit.
#[derive(Debug, Clone)]
pub struct ResourceGroup<'a> {
    /// The pattern that names the group's file
    pub root: DeclaredPath<'a>,
    /// All patterns of the group, root included, in declaration order
    pub members: Vec<DeclaredPath<'a>>,
}

impl<'a> ResourceGroup<'a> {
    fn open(root: DeclaredPath<'a>) -> Self {
        Self {
            root,
            members: vec![root],
        }
    }

    /// Declaration index of the group's earliest member.
    pub fn first_declared(&self) -> usize {
        self.members
            .iter()
            .map(|m| m.index)
            .min()
            .unwrap_or(self.root.index)
    }

    pub fn patterns(&self) -> Vec<&'a str> {
        self.members.iter().map(|m| m.pattern).collect()
    }
}

#[derive(Debug)]
struct PathNode<'a> {
    segment: Option<Segment>,
    declared: Vec<DeclaredPath<'a>>,
    children: Vec<PathNode<'a>>,
}

impl<'a> PathNode<'a> {
    fn new(segment: Option<Segment>) -> Self {
        Self {
            segment,
            declared: Vec::new(),
            children: Vec::new(),
        }
    }

    fn child_mut(&mut self, segment: Segment) -> &mut PathNode<'a> {
        let pos = match self
            .children
            .iter()
            .position(|c| c.segment.as_ref() == Some(&segment))
        {
            Some(pos) => pos,
            None => {
                self.children.push(PathNode::new(Some(segment)));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    fn starts_with_param(&self) -> bool {
        self.segment.as_ref().is_some_and(Segment::is_param)
    }
}

/// Hierarchy of declared patterns keyed by path segment.
#[derive(Debug)]
pub struct PathTree<'a> {
    root: PathNode<'a>,
    len: usize,
}

impl<'a> PathTree<'a> {
    /// Builds the tree from every declared pattern, regardless of order.
    pub fn build(paths: &'a IndexMap<String, PathItem>) -> Self {
        let mut root = PathNode::new(None);

        for (index, (pattern, item)) in paths.iter().enumerate() {
            let mut node = &mut root;
            for segment in split_segments(pattern) {
                node = node.child_mut(segment);
            }
            node.declared.push(DeclaredPath {
                index,
                pattern: pattern.as_str(),
                item,
            });
        }

        Self {
            root,
            len: paths.len(),
        }
    }

    /// Number of declared patterns in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walks the tree and returns its resource groups in declaration order.
    pub fn resource_groups(&self) -> Vec<ResourceGroup<'a>> {
        let mut closed = Vec::new();
        let mut none = None;
        Self::walk(&self.root, &mut none, false, &mut closed);

        for group in &mut closed {
            group.members.sort_by_key(|m| m.index);
        }
        closed.sort_by_key(|g| g.first_declared());
        closed
    }

    /// `joins_parent` is true when the first segment below the nearest
    /// declared ancestor is a parameter.
    fn walk(
        node: &PathNode<'a>,
        open: &mut Option<ResourceGroup<'a>>,
        joins_parent: bool,
        closed: &mut Vec<ResourceGroup<'a>>,
    ) {
        let Some((first, rest)) = node.declared.split_first() else {
            for child in &node.children {
                Self::walk(child, open, joins_parent, closed);
            }
            return;
        };

        let joined = match open.as_mut() {
            Some(group) if joins_parent => {
                debug!("{} joins resource group {}", first.pattern, group.root.pattern);
                group.members.extend(node.declared.iter().copied());
                true
            }
            _ => false,
        };

        if joined {
            for child in &node.children {
                Self::walk(child, open, child.starts_with_param(), closed);
            }
            return;
        }

        debug!("{} starts a resource group", first.pattern);
        let mut own = Some(ResourceGroup::open(*first));
        if let Some(group) = own.as_mut() {
            group.members.extend(rest.iter().copied());
        }
        for child in &node.children {
            Self::walk(child, &mut own, child.starts_with_param(), closed);
        }
        closed.extend(own);
    }
}

/// Groups a document's declared paths into resources.
pub fn classify(paths: &IndexMap<String, PathItem>) -> Vec<ResourceGroup<'_>> {
    let tree = PathTree::build(paths);
    let groups = tree.resource_groups();
    debug!(
        "Classified {} paths into {} resource groups",
        tree.len(),
        groups.len()
    );
    groups
}
