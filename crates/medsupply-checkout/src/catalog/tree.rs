//! Tree views over a flat category list.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use super::category::Category;
use crate::error::CheckoutError;
use crate::ids::CategoryId;

/// A category with its nested children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of categories in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::size).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::depth).max().unwrap_or(0)
    }
}

fn sort_key(category: &Category) -> (i32, &str) {
    (category.position, category.name.as_str())
}

/// Parent id -> children indices, sorted by position then name.
fn children_index(categories: &[Category]) -> HashMap<&CategoryId, Vec<usize>> {
    let known: HashSet<&CategoryId> = categories.iter().map(|c| &c.id).collect();
    let mut index: HashMap<&CategoryId, Vec<usize>> = HashMap::new();
    for (i, category) in categories.iter().enumerate() {
        if let Some(parent) = &category.parent_id {
            if known.contains(parent) && parent != &category.id {
                index.entry(parent).or_default().push(i);
            }
        }
    }
    for children in index.values_mut() {
        children.sort_by(|a, b| sort_key(&categories[*a]).cmp(&sort_key(&categories[*b])));
    }
    index
}

fn attach(
    i: usize,
    categories: &[Category],
    index: &HashMap<&CategoryId, Vec<usize>>,
    placed: &mut HashSet<usize>,
) -> CategoryNode {
    placed.insert(i);
    let category = &categories[i];
    let mut children = Vec::new();
    if let Some(child_indices) = index.get(&category.id) {
        for &child in child_indices {
            if !placed.contains(&child) {
                children.push(attach(child, categories, index, placed));
            }
        }
    }
    CategoryNode {
        category: category.clone(),
        children,
    }
}

/// Nest a flat list into trees.
///
/// Categories whose parent is missing from the list become roots. Categories
/// caught in a parent cycle are cut loose at the lowest-sorted member of the
/// cycle, which becomes a root.
pub fn build_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let known: HashSet<&CategoryId> = categories.iter().map(|c| &c.id).collect();
    let index = children_index(categories);

    let mut roots: Vec<usize> = categories
        .iter()
        .enumerate()
        .filter(|(_, c)| match &c.parent_id {
            None => true,
            Some(parent) => !known.contains(parent) || parent == &c.id,
        })
        .map(|(i, _)| i)
        .collect();
    roots.sort_by(|a, b| sort_key(&categories[*a]).cmp(&sort_key(&categories[*b])));

    let mut placed = HashSet::new();
    let mut tree: Vec<CategoryNode> = Vec::new();
    for root in roots {
        if !placed.contains(&root) {
            tree.push(attach(root, categories, &index, &mut placed));
        }
    }

    loop {
        let stranded = (0..categories.len())
            .filter(|i| !placed.contains(i))
            .min_by(|a, b| sort_key(&categories[*a]).cmp(&sort_key(&categories[*b])));
        let Some(i) = stranded else { break };
        warn!(category = %categories[i].id, "category parent cycle, promoting to root");
        tree.push(attach(i, categories, &index, &mut placed));
    }

    debug!(categories = categories.len(), roots = tree.len(), "built category tree");
    tree
}

/// Ids of every category below `id`, breadth first. Does not include `id`.
pub fn descendant_ids(categories: &[Category], id: &CategoryId) -> Vec<CategoryId> {
    let index = children_index(categories);
    let mut seen: HashSet<&CategoryId> = HashSet::from([id]);
    let mut queue: VecDeque<&CategoryId> = VecDeque::from([id]);
    let mut found = Vec::new();

    while let Some(current) = queue.pop_front() {
        for &child in index.get(current).into_iter().flatten() {
            let child_id = &categories[child].id;
            if seen.insert(child_id) {
                found.push(child_id.clone());
                queue.push_back(child_id);
            }
        }
    }
    found
}

/// Remove `id` and its whole subtree.
///
/// Returns the remaining categories and the removed ids, `id` first.
pub fn delete_category(
    categories: Vec<Category>,
    id: &CategoryId,
) -> Result<(Vec<Category>, Vec<CategoryId>), CheckoutError> {
    if !categories.iter().any(|c| &c.id == id) {
        return Err(CheckoutError::CategoryNotFound(id.to_string()));
    }

    let mut removed = vec![id.clone()];
    removed.extend(descendant_ids(&categories, id));
    let doomed: HashSet<&CategoryId> = removed.iter().collect();

    let remaining = categories
        .into_iter()
        .filter(|c| !doomed.contains(&c.id))
        .collect();
    debug!(category = %id, removed = removed.len(), "deleted category subtree");
    Ok((remaining, removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Category> {
        vec![
            Category::new("ppe", "PPE").with_position(2),
            Category::new("diag", "Diagnostics").with_position(1),
            Category::new("gloves", "Gloves").with_parent("ppe").with_position(1),
            Category::new("masks", "Masks").with_parent("ppe").with_position(1),
            Category::new("n95", "N95").with_parent("masks"),
            Category::new("thermo", "Thermometers").with_parent("diag"),
        ]
    }

    fn names(nodes: &[CategoryNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.category.name.as_str()).collect()
    }

    #[test]
    fn test_build_tree_orders_by_position_then_name() {
        let tree = build_tree(&catalog());
        assert_eq!(names(&tree), vec!["Diagnostics", "PPE"]);
        assert_eq!(names(&tree[1].children), vec!["Gloves", "Masks"]);
        assert_eq!(tree[1].size(), 4);
        assert_eq!(tree[1].depth(), 3);
    }

    #[test]
    fn test_orphan_becomes_root() {
        let mut cats = catalog();
        cats.push(Category::new("lost", "Lost").with_parent("gone"));
        let tree = build_tree(&cats);
        assert!(names(&tree).contains(&"Lost"));
    }

    #[test]
    fn test_cycle_is_broken() {
        let cats = vec![
            Category::new("a", "Alpha").with_parent("b"),
            Category::new("b", "Beta").with_parent("a"),
            Category::new("self", "Selfish").with_parent("self"),
        ];
        let tree = build_tree(&cats);
        let total: usize = tree.iter().map(CategoryNode::size).sum();
        assert_eq!(total, 3);
        assert_eq!(names(&tree), vec!["Selfish", "Alpha"]);
        assert_eq!(names(&tree[1].children), vec!["Beta"]);
    }

    #[test]
    fn test_descendant_ids() {
        let ids = descendant_ids(&catalog(), &CategoryId::new("ppe"));
        let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["gloves", "masks", "n95"]);
        assert!(descendant_ids(&catalog(), &CategoryId::new("n95")).is_empty());
    }

    #[test]
    fn test_descendant_ids_terminates_on_cycle() {
        let cats = vec![
            Category::new("a", "Alpha").with_parent("b"),
            Category::new("b", "Beta").with_parent("a"),
        ];
        assert_eq!(descendant_ids(&cats, &CategoryId::new("a")), vec![CategoryId::new("b")]);
    }

    #[test]
    fn test_delete_category_removes_subtree() {
        let (remaining, removed) = delete_category(catalog(), &CategoryId::new("ppe")).unwrap();
        assert_eq!(removed.len(), 4);
        assert_eq!(removed[0].as_str(), "ppe");
        let left: Vec<&str> = remaining.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(left, vec!["diag", "thermo"]);
    }

    #[test]
    fn test_delete_missing_category() {
        let err = delete_category(catalog(), &CategoryId::new("nope")).unwrap_err();
        assert!(matches!(err, CheckoutError::CategoryNotFound(id) if id == "nope"));
    }
}
