//! Namespace tree used to cluster modules in rendered diagrams

use std::collections::HashSet;

use crate::core::{Module, segments};

/// A node of the namespace tree.
///
/// A node carries a `path` when a module lives at exactly that segment
/// chain, and has children when other paths continue past it. A node can be
/// both at once (`:core` next to `:core:data`). Children keep the order in
/// which their segment was first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNode {
    path: Option<String>,
    is_target: bool,
    children: Vec<(String, PathNode)>,
}

impl PathNode {
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn is_target(&self) -> bool {
        self.is_target
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.children.is_empty()
    }

    /// Children in insertion order, keyed by their segment
    pub fn children(&self) -> impl Iterator<Item = (&str, &PathNode)> {
        self.children
            .iter()
            .map(|(segment, node)| (segment.as_str(), node))
    }

    pub fn child(&self, segment: &str) -> Option<&PathNode> {
        self.children
            .iter()
            .find(|(key, _)| key == segment)
            .map(|(_, node)| node)
    }

    /// Every node of the subtree, depth first, this node included
    #[cfg(test)]
    fn descendants(&self) -> Vec<&PathNode> {
        let mut nodes = vec![self];
        for (_, child) in &self.children {
            nodes.extend(child.descendants());
        }
        nodes
    }

    fn child_entry(&mut self, segment: &str) -> &mut PathNode {
        let index = match self.children.iter().position(|(key, _)| key == segment) {
            Some(index) => index,
            None => {
                self.children
                    .push((segment.to_string(), PathNode::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }
}

/// Builds a [`PathNode`] tree out of hierarchical module paths.
///
/// Inserting a path creates (or reuses) one container node per leading
/// segment and marks the node of the last segment with the full path.
/// Inserting the same path again changes nothing.
pub struct PathTreeBuilder {
    target: String,
    root: PathNode,
}

impl PathTreeBuilder {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            root: PathNode::default(),
        }
    }

    /// Build the tree for `target` and every path in `paths`
    pub fn build<I, S>(target: &str, paths: I) -> PathNode
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new(target);
        for path in paths {
            builder.insert(path.as_ref());
        }
        builder.finish()
    }

    pub fn insert(&mut self, path: &str) -> &mut Self {
        let parts: Vec<&str> = segments(path).collect();
        let Some((last, parents)) = parts.split_last() else {
            return self;
        };

        let mut current = &mut self.root;
        for segment in parents {
            current = current.child_entry(segment);
        }

        let leaf = current.child_entry(last);
        leaf.path = Some(path.to_string());
        leaf.is_target = path == self.target;
        self
    }

    pub fn finish(self) -> PathNode {
        self.root
    }
}

/// The path of `module` followed by the path of every transitive
/// dependency, in discovery order.
///
/// Each module lists its direct dependencies before any of them is
/// expanded, so the resulting order (and therefore the tree order) puts
/// nearer dependencies first.
pub fn dependency_paths(module: &Module) -> Vec<String> {
    let mut paths = vec![module.path.clone()];
    let mut expanded = HashSet::new();
    collect_paths(module, &mut paths, &mut expanded);
    paths
}

fn collect_paths<'a>(module: &'a Module, paths: &mut Vec<String>, expanded: &mut HashSet<&'a str>) {
    if !expanded.insert(module.path.as_str()) {
        return;
    }

    paths.extend(module.dependencies.iter().map(|d| d.path.clone()));
    for dependency in &module.dependencies {
        collect_paths(dependency, paths, expanded);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn segments_of(node: &PathNode) -> Vec<&str> {
        node.children().map(|(segment, _)| segment).collect()
    }

    #[test]
    fn test_builds_namespace_containers() {
        let tree = PathTreeBuilder::build(":app", [":app", ":core:data", ":core:model"]);

        assert_eq!(segments_of(&tree), vec!["app", "core"]);

        let app = tree.child("app").unwrap();
        assert_eq!(app.path(), Some(":app"));
        assert!(app.is_target());
        assert!(!app.has_children());

        let core = tree.child("core").unwrap();
        assert_eq!(core.path(), None);
        assert!(!core.is_target());
        assert_eq!(segments_of(core), vec!["data", "model"]);
        assert_eq!(core.child("data").unwrap().path(), Some(":core:data"));
    }

    #[test]
    fn test_insertion_is_idempotent() {
        let once = PathTreeBuilder::build(":app", [":app", ":core:data"]);
        let twice = PathTreeBuilder::build(":app", [":app", ":core:data", ":core:data", ":app"]);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_module_can_also_be_a_container() {
        let child_first = PathTreeBuilder::build(":app", [":core:data", ":core"]);
        let parent_first = PathTreeBuilder::build(":app", [":core", ":core:data"]);

        for tree in [&child_first, &parent_first] {
            let core = tree.child("core").unwrap();
            assert_eq!(core.path(), Some(":core"));
            assert_eq!(core.child("data").unwrap().path(), Some(":core:data"));
        }

        // Revisiting the module keeps the children it already has
        let revisited = PathTreeBuilder::build(":app", [":core", ":core:data", ":core"]);
        assert_eq!(revisited, parent_first);
    }

    #[test]
    fn test_single_target_flag() {
        let tree = PathTreeBuilder::build(
            ":core:data",
            [":core:data", ":core:api", ":core", ":app", ":core:data"],
        );

        let targets: Vec<_> = tree
            .descendants()
            .into_iter()
            .filter(|node| node.is_target())
            .collect();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].path(), Some(":core:data"));
    }

    #[test]
    fn test_empty_input_yields_empty_root() {
        let tree = PathTreeBuilder::build(":app", Vec::<String>::new());
        assert!(tree.is_empty());

        let only_separators = PathTreeBuilder::build(":app", [":", ""]);
        assert!(only_separators.is_empty());
    }

    #[test]
    fn test_dependency_paths_lists_direct_dependencies_first() {
        let model = Rc::new(Module::leaf(":core:model"));
        let api = Rc::new(Module::new(":core:api", vec![Rc::clone(&model)]));
        let database = Rc::new(Module::leaf(":core:database"));
        let data = Rc::new(Module::new(
            ":core:data",
            vec![Rc::clone(&api), database, Rc::clone(&model)],
        ));
        let app = Module::new(":app", vec![data, model, api]);

        assert_eq!(
            dependency_paths(&app),
            vec![
                ":app",
                ":core:data",
                ":core:model",
                ":core:api",
                ":core:api",
                ":core:database",
                ":core:model",
                ":core:model",
            ]
        );
    }
}
