use crate::action::Action;
use crate::backing::Backing;
use crate::error::{IterateError, Result};
use crate::iterate::Iterate;
use crate::source::{Driver, Source, unsupported};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Child-index path from the root to a node; the root's path is empty
pub type TreePath = Vec<usize>;

type ChildrenFn<'a, N> = Box<dyn for<'n> Fn(&'n mut N) -> Option<&'n mut Vec<N>> + 'a>;
type ReplaceFn<'a, N> = Box<dyn Fn(&mut N, N) + 'a>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Pre-order: a node, then each child's full subtree in order
    #[default]
    DepthFirst,
    /// Level order
    BreadthFirst,
}

/// Outcome of visiting one subtree, reported to the parent's child loop
enum Visit {
    Continue,
    Remove,
    Stop,
}

/// Adapter over an n-ary tree whose nodes keep their children in a `Vec`
///
/// Removal is only possible depth-first: the recursion hands the removal of a
/// child back to the loop walking its parent's children, which splices it
/// out. Breadth-first traversal keeps no parent handle and cannot remove. The
/// root itself cannot be removed in either order. Replacement goes through
/// the caller's setter.
pub struct TreeSource<'a, N> {
    root: RefCell<Backing<'a, N>>,
    children: ChildrenFn<'a, N>,
    replace: Option<ReplaceFn<'a, N>>,
    order: TraversalOrder,
    strict: bool,
}

impl<'a, N> TreeSource<'a, N> {
    pub fn new<F>(root: Backing<'a, N>, children: F) -> Self
    where
        F: for<'n> Fn(&'n mut N) -> Option<&'n mut Vec<N>> + 'a,
    {
        TreeSource {
            root: RefCell::new(root),
            children: Box::new(children),
            replace: None,
            order: TraversalOrder::DepthFirst,
            strict: true,
        }
    }

    pub fn order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn breadth_first(self) -> Self {
        self.order(TraversalOrder::BreadthFirst)
    }

    pub fn replace_with<F>(mut self, replace: F) -> Self
    where
        F: Fn(&mut N, N) + 'a,
    {
        self.replace = Some(Box::new(replace));
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn replace(&self, node: &mut N, replacement: Option<N>) -> Result<()> {
        match (&self.replace, replacement) {
            (Some(replace), Some(value)) => {
                replace(node, value);
                Ok(())
            }
            (None, _) => unsupported("tree", Action::Replace, self.strict),
            _ => Ok(()),
        }
    }

    fn depth_first(
        &self,
        node: &mut N,
        path: &mut TreePath,
        driver: &mut Driver<'_, TreePath, N>,
    ) -> Result<Visit> {
        match driver.act(node, path)? {
            Action::Continue => {}
            Action::Stop => return Ok(Visit::Stop),
            Action::Remove if path.is_empty() => unsupported("tree root", Action::Remove, self.strict)?,
            Action::Remove => return Ok(Visit::Remove),
            Action::Replace => {
                let replacement = driver.replacement();
                self.replace(node, replacement)?;
            }
        }

        if let Some(children) = (self.children)(node) {
            let mut index = 0;
            while index < children.len() {
                path.push(index);
                let visit = self.depth_first(&mut children[index], path, driver);
                path.pop();
                match visit? {
                    Visit::Continue => index += 1,
                    Visit::Remove => {
                        children.remove(index);
                    }
                    Visit::Stop => return Ok(Visit::Stop),
                }
            }
        }
        Ok(Visit::Continue)
    }

    fn breadth_first_walk(&self, root: &mut N, driver: &mut Driver<'_, TreePath, N>) -> Result<()> {
        let mut queue: VecDeque<(&mut N, TreePath)> = VecDeque::new();
        queue.push_back((root, TreePath::new()));

        while let Some((node, path)) = queue.pop_front() {
            match driver.act(node, &path)? {
                Action::Continue => {}
                Action::Stop => return Ok(()),
                Action::Remove => unsupported("breadth-first tree", Action::Remove, self.strict)?,
                Action::Replace => {
                    let replacement = driver.replacement();
                    self.replace(node, replacement)?;
                }
            }

            if let Some(children) = (self.children)(node) {
                for (index, child) in children.iter_mut().enumerate() {
                    let mut child_path = path.clone();
                    child_path.push(index);
                    queue.push_back((child, child_path));
                }
            }
        }
        Ok(())
    }
}

impl<'a, N> Source<TreePath, N> for TreeSource<'a, N> {
    fn drive(&self, driver: &mut Driver<'_, TreePath, N>) -> Result<()> {
        let mut root = self
            .root
            .try_borrow_mut()
            .map_err(|_| IterateError::reentrant("tree"))?;

        match self.order {
            TraversalOrder::DepthFirst => {
                self.depth_first(&mut root, &mut TreePath::new(), driver)?;
                Ok(())
            }
            TraversalOrder::BreadthFirst => self.breadth_first_walk(&mut root, driver),
        }
    }
}

/// Iterate over a borrowed tree, depth-first
pub fn tree<'a, N, F>(root: &'a mut N, children: F) -> Iterate<'a, TreePath, N>
where
    N: 'a,
    F: for<'n> Fn(&'n mut N) -> Option<&'n mut Vec<N>> + 'a,
{
    Iterate::new(TreeSource::new(Backing::Borrowed(root), children))
}

/// Iterate over a tree the chain owns, depth-first
pub fn tree_owned<'a, N, F>(root: N, children: F) -> Iterate<'a, TreePath, N>
where
    N: 'a,
    F: for<'n> Fn(&'n mut N) -> Option<&'n mut Vec<N>> + 'a,
{
    Iterate::new(TreeSource::new(Backing::Owned(root), children))
}

/// Iterate over a tree using a configured [`TreeSource`]
pub fn tree_with<'a, N: 'a>(source: TreeSource<'a, N>) -> Iterate<'a, TreePath, N> {
    Iterate::new(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Node {
        name: &'static str,
        children: Vec<Node>,
    }

    fn node(name: &'static str, children: Vec<Node>) -> Node {
        Node { name, children }
    }

    ///        a
    ///      / | \
    ///     b  e  f
    ///    / \     \
    ///   c   d     g
    fn fixture() -> Node {
        node(
            "a",
            vec![
                node("b", vec![node("c", vec![]), node("d", vec![])]),
                node("e", vec![]),
                node("f", vec![node("g", vec![])]),
            ],
        )
    }

    fn children(node: &mut Node) -> Option<&mut Vec<Node>> {
        Some(&mut node.children)
    }

    fn names(iter: &Iterate<TreePath, Node>) -> Vec<&'static str> {
        let mut names = Vec::new();
        iter.each(|node, _, _| names.push(node.name)).unwrap();
        names
    }

    #[test]
    fn test_depth_first_order() {
        let mut root = fixture();
        let iter = tree(&mut root, children);
        assert_eq!(names(&iter), vec!["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_breadth_first_order() {
        let mut root = fixture();
        let iter = tree_with(TreeSource::new(Backing::Borrowed(&mut root), children).breadth_first());
        assert_eq!(names(&iter), vec!["a", "b", "e", "f", "c", "d", "g"]);
    }

    #[test]
    fn test_paths() {
        let mut root = fixture();
        let mut paths = Vec::new();
        tree(&mut root, children)
            .each(|node, path, _| paths.push((node.name, path.clone())))
            .unwrap();
        assert_eq!(paths[0], ("a", vec![]));
        assert_eq!(paths[3], ("d", vec![0, 1]));
        assert_eq!(paths[6], ("g", vec![2, 0]));
    }

    #[test]
    fn test_depth_first_remove_subtree() {
        let mut root = fixture();
        tree(&mut root, children)
            .each(|node, _, cursor| {
                if node.name == "b" || node.name == "g" {
                    cursor.remove();
                }
            })
            .unwrap();
        assert_eq!(
            root,
            node("a", vec![node("e", vec![]), node("f", vec![])])
        );
    }

    #[test]
    fn test_stop_bubbles_from_depth() {
        let mut root = fixture();
        let mut seen = Vec::new();
        tree(&mut root, children)
            .each(|node, _, cursor| {
                seen.push(node.name);
                if node.name == "c" {
                    cursor.stop();
                }
            })
            .unwrap();
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_breadth_first_remove_rejected() {
        let mut root = fixture();
        let iter = tree_with(TreeSource::new(Backing::Borrowed(&mut root), children).breadth_first());
        let result = iter.each(|node, _, cursor| {
            if node.name == "e" {
                cursor.remove();
            }
        });
        assert!(matches!(result, Err(IterateError::Unsupported { .. })));
    }

    #[test]
    fn test_breadth_first_remove_ignored_when_lenient() {
        let mut root = fixture();
        let iter = tree_with(
            TreeSource::new(Backing::Borrowed(&mut root), children)
                .breadth_first()
                .strict(false),
        );
        let result = iter.each(|node, _, cursor| {
            if node.name == "e" {
                cursor.remove();
            }
        });
        assert!(result.is_ok());
        assert_eq!(names(&iter).len(), 7);
    }

    #[test]
    fn test_replace_keeps_children() {
        let mut root = fixture();
        let source = TreeSource::new(Backing::Borrowed(&mut root), children)
            .replace_with(|node: &mut Node, replacement: Node| node.name = replacement.name);
        tree_with(source)
            .each(|node, _, cursor| {
                if node.name == "b" {
                    cursor.replace(self::node("B", vec![]));
                }
            })
            .unwrap();
        assert_eq!(root.children[0].name, "B");
        assert_eq!(root.children[0].children.len(), 2);
    }

    #[test]
    fn test_breadth_first_replace() {
        let mut root = fixture();
        let source = TreeSource::new(Backing::Borrowed(&mut root), children)
            .breadth_first()
            .replace_with(|node: &mut Node, replacement: Node| node.name = replacement.name);
        let mut seen = Vec::new();
        tree_with(source)
            .each(|node, _, cursor| {
                seen.push(node.name);
                if node.name == "e" {
                    cursor.replace(self::node("E", vec![]));
                }
            })
            .unwrap();
        assert_eq!(seen, vec!["a", "b", "e", "f", "c", "d", "g"]);
        assert_eq!(root.children[1].name, "E");
    }

    #[test]
    fn test_owned_tree_edits_stay_inside() {
        let iter = tree_owned(fixture(), children);
        iter.each(|node, _, cursor| {
            if node.name == "f" {
                cursor.remove();
            }
        })
        .unwrap();
        assert_eq!(names(&iter), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_root_remove_rejected() {
        let mut root = fixture();
        let iter = tree(&mut root, children);
        let result = iter.each(|node, _, cursor| {
            if node.name == "a" {
                cursor.remove();
            }
        });
        assert!(matches!(
            result,
            Err(IterateError::Unsupported {
                adapter: "tree root",
                ..
            })
        ));
    }

    #[test]
    fn test_root_remove_ignored_when_lenient() {
        let mut root = node("a", vec![node("b", vec![node("c", vec![])]), node("d", vec![])]);
        let mut seen = Vec::new();
        tree_with(TreeSource::new(Backing::Borrowed(&mut root), children).strict(false))
            .each(|node, _, cursor| {
                seen.push(node.name);
                if node.name == "a" || node.name == "c" {
                    cursor.remove();
                }
            })
            .unwrap();
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
        assert_eq!(root, node("a", vec![node("b", vec![]), node("d", vec![])]));
    }
}
