//! Navigation menu tree.
//!
//! Menu items are kept as a flat arena keyed by id; the tree only exists as
//! `parent_id` links. Rendering reads two levels (active roots and their
//! active children). Reparenting is checked against the descendant set so
//! the links can never form a cycle.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::page::page_path;
use crate::types::{DbId, SortOrder};

/// Anchor used when an item links nowhere.
pub const FALLBACK_URL: &str = "#";

/// One menu row, as loaded from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    /// Slug of the linked page, if any.
    pub page_slug: Option<String>,
    pub url: String,
    pub order: SortOrder,
    pub is_active: bool,
}

impl MenuNode {
    pub fn resolved_url(&self) -> String {
        resolve_url(self.page_slug.as_deref(), &self.url)
    }
}

/// A second-level menu link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLink {
    pub title: String,
    pub url: String,
}

/// A top-level menu entry with its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub title: String,
    pub url: String,
    pub children: Vec<MenuLink>,
}

/// Linked page path, else the raw URL, else [`FALLBACK_URL`].
pub fn resolve_url(page_slug: Option<&str>, url: &str) -> String {
    if let Some(slug) = page_slug.filter(|s| !s.is_empty()) {
        return page_path(slug);
    }
    if !url.trim().is_empty() {
        return url.to_string();
    }
    FALLBACK_URL.to_string()
}

fn by_order_then_title(a: &&MenuNode, b: &&MenuNode) -> std::cmp::Ordering {
    (a.order, &a.title).cmp(&(b.order, &b.title))
}

/// Build the navigation structure: active roots, each with active children.
pub fn build_menu(nodes: &[MenuNode]) -> Vec<MenuEntry> {
    let mut children_of: HashMap<DbId, Vec<&MenuNode>> = HashMap::new();
    let mut roots: Vec<&MenuNode> = Vec::new();

    for node in nodes.iter().filter(|n| n.is_active) {
        match node.parent_id {
            None => roots.push(node),
            Some(parent) => children_of.entry(parent).or_default().push(node),
        }
    }
    roots.sort_by(by_order_then_title);

    roots
        .into_iter()
        .map(|root| {
            let mut children = children_of.remove(&root.id).unwrap_or_default();
            children.sort_by(by_order_then_title);
            MenuEntry {
                title: root.title.clone(),
                url: root.resolved_url(),
                children: children
                    .into_iter()
                    .map(|c| MenuLink {
                        title: c.title.clone(),
                        url: c.resolved_url(),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// All descendants of `id` (not including `id` itself).
///
/// Iterative, with a visited set, so malformed data that already contains
/// a cycle still terminates.
pub fn descendants(nodes: &[MenuNode], id: DbId) -> HashSet<DbId> {
    let mut children_of: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for node in nodes {
        if let Some(parent) = node.parent_id {
            children_of.entry(parent).or_default().push(node.id);
        }
    }

    let mut found = HashSet::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        for &child in children_of.get(&current).into_iter().flatten() {
            if child != id && found.insert(child) {
                stack.push(child);
            }
        }
    }
    found
}

/// Items that may become the parent of `id`: active items other than `id`
/// and its descendants, ordered by `(order, title)`. `None` means a new
/// item, for which every active item is a valid parent.
pub fn valid_parent_choices(nodes: &[MenuNode], id: Option<DbId>) -> Vec<&MenuNode> {
    let excluded = match id {
        Some(id) => {
            let mut set = descendants(nodes, id);
            set.insert(id);
            set
        }
        None => HashSet::new(),
    };

    let mut choices: Vec<&MenuNode> = nodes
        .iter()
        .filter(|n| n.is_active && !excluded.contains(&n.id))
        .collect();
    choices.sort_by(by_order_then_title);
    choices
}

/// Reject a parent the parent picker would not offer: the item itself, one
/// of its descendants, or an inactive item. `id` is `None` for an item not
/// yet created. A parent missing from `nodes` is left to the caller.
pub fn validate_reparent(
    nodes: &[MenuNode],
    id: Option<DbId>,
    new_parent: Option<DbId>,
) -> Result<(), CoreError> {
    let Some(parent) = new_parent else {
        return Ok(());
    };
    if let Some(id) = id {
        if parent == id {
            return Err(CoreError::Validation(
                "A menu item cannot be its own parent".into(),
            ));
        }
        if descendants(nodes, id).contains(&parent) {
            return Err(CoreError::Validation(format!(
                "Menu item {parent} is a descendant of {id} and cannot become its parent"
            )));
        }
    }
    if nodes.iter().any(|n| n.id == parent && !n.is_active) {
        return Err(CoreError::Validation(format!(
            "Menu item {parent} is inactive and cannot become a parent"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn node(id: DbId, parent_id: Option<DbId>, title: &str, order: SortOrder) -> MenuNode {
        MenuNode {
            id,
            parent_id,
            title: title.to_string(),
            page_slug: None,
            url: String::new(),
            order,
            is_active: true,
        }
    }

    /// 1 Home, 2 Teams (3 Seniors (5 Reserves), 4 Juniors), 6 Contact
    fn sample() -> Vec<MenuNode> {
        vec![
            MenuNode {
                page_slug: Some("home".into()),
                ..node(1, None, "Home", 0)
            },
            node(2, None, "Teams", 1),
            MenuNode {
                url: "/teams/seniors/".into(),
                ..node(3, Some(2), "Seniors", 1)
            },
            node(4, Some(2), "Juniors", 0),
            node(5, Some(3), "Reserves", 0),
            MenuNode {
                url: "https://maps.example/club".into(),
                ..node(6, None, "Contact", 2)
            },
        ]
    }

    #[test]
    fn url_prefers_page_then_raw_then_fallback() {
        assert_eq!(resolve_url(Some("about"), "/ignored/"), "/pages/about/");
        assert_eq!(resolve_url(None, "/news/"), "/news/");
        assert_eq!(resolve_url(Some(""), "  "), FALLBACK_URL);
    }

    #[test]
    fn build_menu_nests_children_in_order() {
        let menu = build_menu(&sample());
        let titles: Vec<_> = menu.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "Teams", "Contact"]);

        assert_eq!(menu[0].url, "/pages/home/");
        assert_eq!(menu[1].url, FALLBACK_URL);
        assert_eq!(
            menu[1].children,
            vec![
                MenuLink {
                    title: "Juniors".into(),
                    url: FALLBACK_URL.into()
                },
                MenuLink {
                    title: "Seniors".into(),
                    url: "/teams/seniors/".into()
                },
            ]
        );
        assert!(menu[2].children.is_empty());
    }

    #[test]
    fn build_menu_skips_inactive_items() {
        let mut nodes = sample();
        nodes[1].is_active = false; // Teams
        nodes[5].is_active = false; // Contact
        let menu = build_menu(&nodes);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].title, "Home");
    }

    #[test]
    fn empty_menu_when_no_active_roots() {
        let nodes = vec![MenuNode {
            is_active: false,
            ..node(1, None, "Hidden", 0)
        }];
        assert!(build_menu(&nodes).is_empty());
    }

    #[test]
    fn descendants_are_transitive() {
        let found = descendants(&sample(), 2);
        assert_eq!(found, HashSet::from([3, 4, 5]));
        assert!(descendants(&sample(), 5).is_empty());
    }

    #[test]
    fn descendants_terminates_on_existing_cycle() {
        let nodes = vec![node(1, Some(2), "A", 0), node(2, Some(1), "B", 0)];
        assert_eq!(descendants(&nodes, 1), HashSet::from([2]));
    }

    #[test]
    fn parent_choices_exclude_self_and_descendants() {
        let nodes = sample();
        let choices: Vec<DbId> = valid_parent_choices(&nodes, Some(2))
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(choices, vec![1, 6]);
    }

    #[test]
    fn parent_choices_for_new_item_include_all_active() {
        let nodes = sample();
        assert_eq!(valid_parent_choices(&nodes, None).len(), nodes.len());
    }

    #[test]
    fn reparent_to_self_or_descendant_is_rejected() {
        let nodes = sample();
        assert_matches!(
            validate_reparent(&nodes, Some(2), Some(2)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_reparent(&nodes, Some(2), Some(5)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_reparent(&nodes, Some(5), Some(6)).is_ok());
        assert!(validate_reparent(&nodes, Some(3), None).is_ok());
    }

    #[test]
    fn inactive_item_is_never_a_valid_parent() {
        let mut nodes = sample();
        nodes[0].is_active = false; // Home

        for id in [Some(6), None] {
            let offered = valid_parent_choices(&nodes, id);
            assert!(offered.iter().all(|n| n.id != 1));
            assert_matches!(
                validate_reparent(&nodes, id, Some(1)),
                Err(CoreError::Validation(_))
            );
        }
        assert!(validate_reparent(&nodes, Some(6), Some(2)).is_ok());
    }
}
