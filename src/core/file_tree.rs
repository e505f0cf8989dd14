//! Directory-shaped aggregation of change records.
//!
//! The discard engine only needs two things from a directory node: a depth-first
//! walk over its leaf files and a predicate-filtered path collector. [`FileNode`]
//! provides those, plus a small builder that groups a flat status list by path
//! components so the CLI can address a directory.

use crate::core::{error::Result, file_change::FileChange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    path: String,
    file: Option<FileChange>,
    children: Vec<FileNode>,
}

impl FileNode {
    pub fn leaf(file: FileChange) -> Self {
        Self {
            path: file.name().to_string(),
            file: Some(file),
            children: Vec::new(),
        }
    }

    pub fn directory(path: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self {
            path: path.into(),
            file: None,
            children,
        }
    }

    /// Build a tree whose root is the working tree itself (path `.`)
    pub fn from_changes(changes: impl IntoIterator<Item = FileChange>) -> Self {
        let mut root = FileNode::directory(".", Vec::new());
        for change in changes {
            let components: Vec<&str> = change.name().split('/').collect();
            let dirs = &components[..components.len().saturating_sub(1)];
            let mut node = &mut root;
            let mut prefix = String::new();
            for dir in dirs {
                if !prefix.is_empty() {
                    prefix.push('/');
                }
                prefix.push_str(dir);
                let index = match node
                    .children
                    .iter()
                    .position(|c| c.file.is_none() && c.path == prefix)
                {
                    Some(index) => index,
                    None => {
                        node.children.push(FileNode::directory(prefix.clone(), Vec::new()));
                        node.children.len() - 1
                    }
                };
                node = &mut node.children[index];
            }
            node.children.push(FileNode::leaf(change));
        }
        root
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file(&self) -> Option<&FileChange> {
        self.file.as_ref()
    }

    pub fn children(&self) -> &[FileNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.file.is_some()
    }

    /// Find the node (file or directory) at `path`
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        let path = path.trim_end_matches('/');
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    /// Visit every leaf file depth-first, stopping at the first error
    pub fn for_each_file<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&FileChange) -> Result<()>,
    {
        self.walk_files(&mut f)
    }

    fn walk_files<F>(&self, f: &mut F) -> Result<()>
    where
        F: FnMut(&FileChange) -> Result<()>,
    {
        if let Some(file) = &self.file {
            return f(file);
        }
        for child in &self.children {
            child.walk_files(f)?;
        }
        Ok(())
    }

    /// Paths of every node (this one included) that satisfies `predicate`
    pub fn paths_matching<P>(&self, predicate: P) -> Vec<String>
    where
        P: Fn(&FileNode) -> bool,
    {
        let mut paths = Vec::new();
        self.collect_matching(&predicate, &mut paths);
        paths
    }

    fn collect_matching<P>(&self, predicate: &P, paths: &mut Vec<String>)
    where
        P: Fn(&FileNode) -> bool,
    {
        if predicate(self) {
            paths.push(self.path.clone());
        }
        for child in &self.children {
            child.collect_matching(predicate, paths);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GitStewardError;
    use crate::core::testing::file;

    fn sample_tree() -> FileNode {
        FileNode::from_changes(vec![
            file("README.md", " M"),
            file("src/lib.rs", " M"),
            file("src/core/new.rs", "??"),
            file("src/core/old.rs", "D "),
        ])
    }

    #[test]
    fn test_from_changes_groups_directories() {
        let tree = sample_tree();
        let src = tree.find("src").unwrap();
        assert!(!src.is_leaf());
        assert_eq!(src.children().len(), 2);
        assert_eq!(tree.find("src/core/").unwrap().children().len(), 2);
        assert!(tree.find("src/core/new.rs").unwrap().is_leaf());
        assert!(tree.find("docs").is_none());
    }

    #[test]
    fn test_for_each_file_visits_leaves_in_order() {
        let mut seen = Vec::new();
        sample_tree()
            .find("src")
            .unwrap()
            .for_each_file(|f| {
                seen.push(f.name().to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec!["src/lib.rs", "src/core/new.rs", "src/core/old.rs"]);
    }

    #[test]
    fn test_for_each_file_stops_at_first_error() {
        let mut seen = 0;
        let result = sample_tree().for_each_file(|_| {
            seen += 1;
            if seen == 2 {
                Err(GitStewardError::NoWorkingTree)
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_paths_matching_untracked() {
        let paths = sample_tree()
            .paths_matching(|n| n.file().is_some_and(|f| !f.is_tracked()));
        assert_eq!(paths, vec!["src/core/new.rs"]);
    }
}
