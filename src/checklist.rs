//! Optimization checklist aggregation
//!
//! All transforms take the current items by reference and return a new
//! collection; the caller owns the mutable state and decides when to swap it.

use crate::error::{AuditError, Result};
use crate::{Impact, Issue};
use serde::{Deserialize, Serialize};

/// A user-toggleable optimization task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Unique, immutable identity
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub completed: bool,
}

/// Completion state of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Pending,
    Completed,
}

impl ChecklistItem {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: Impact,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            title: title.into(),
            description: description.into(),
            impact,
            completed: false,
        }
    }

    pub fn state(&self) -> ItemState {
        if self.completed {
            ItemState::Completed
        } else {
            ItemState::Pending
        }
    }
}

/// Anything that can be grouped under a category heading
pub trait Categorized {
    fn category(&self) -> &str;
}

impl Categorized for ChecklistItem {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Categorized for Issue {
    fn category(&self) -> &str {
        &self.category
    }
}

/// Items sharing a category, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a, T> {
    pub category: &'a str,
    pub items: Vec<&'a T>,
}

/// Completion summary for a checklist
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
    /// 0-100; defined as 0 for an empty checklist
    pub percentage: f64,
}

pub fn completion_stats(items: &[ChecklistItem]) -> CompletionStats {
    let completed = items.iter().filter(|i| i.completed).count();
    let total = items.len();
    let percentage = if total == 0 {
        0.0
    } else {
        completed as f64 * 100.0 / total as f64
    };
    CompletionStats {
        completed,
        total,
        percentage,
    }
}

/// Group by category: categories in first-seen order, items in insertion order.
pub fn group_by_category<T: Categorized>(items: &[T]) -> Vec<CategoryGroup<'_, T>> {
    let mut groups: Vec<CategoryGroup<'_, T>> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category()) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                category: item.category(),
                items: vec![item],
            }),
        }
    }
    groups
}

/// Flip `completed` on the item with the given id.
pub fn toggle_completion(items: &[ChecklistItem], id: &str) -> Result<Vec<ChecklistItem>> {
    if !items.iter().any(|i| i.id == id) {
        return Err(AuditError::NotFound(id.to_string()));
    }
    Ok(items
        .iter()
        .map(|item| {
            if item.id == id {
                ChecklistItem {
                    completed: !item.completed,
                    ..item.clone()
                }
            } else {
                item.clone()
            }
        })
        .collect())
}

/// Every item back to pending, identity and order preserved.
pub fn reset_all(items: &[ChecklistItem]) -> Vec<ChecklistItem> {
    items
        .iter()
        .map(|item| ChecklistItem {
            completed: false,
            ..item.clone()
        })
        .collect()
}

/// The built-in performance optimization checklist
pub fn default_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new(
            "1",
            "Images",
            "Optimize image formats",
            "Use WebP/AVIF formats and appropriate sizing",
            Impact::High,
        ),
        ChecklistItem::new(
            "2",
            "Images",
            "Implement lazy loading",
            "Load images only when they enter the viewport",
            Impact::Medium,
        ),
        ChecklistItem::new(
            "3",
            "JavaScript",
            "Code splitting",
            "Split bundles and load code on demand",
            Impact::High,
        ),
        ChecklistItem::new(
            "4",
            "JavaScript",
            "Remove unused code",
            "Eliminate dead code and unused dependencies",
            Impact::Medium,
        ),
        ChecklistItem::new(
            "5",
            "CSS",
            "Critical CSS inlining",
            "Inline above-the-fold CSS to prevent render blocking",
            Impact::High,
        ),
        ChecklistItem::new(
            "6",
            "Network",
            "Enable compression",
            "Use gzip/brotli compression for text assets",
            Impact::Medium,
        ),
        ChecklistItem::new(
            "7",
            "Network",
            "Optimize caching",
            "Set appropriate cache headers for static assets",
            Impact::Medium,
        ),
        ChecklistItem::new(
            "8",
            "Performance",
            "Preload critical resources",
            "Preload fonts, critical images, and key resources",
            Impact::Medium,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str, completed: bool) -> ChecklistItem {
        ChecklistItem {
            completed,
            ..ChecklistItem::new(id, category, format!("task {}", id), "", Impact::Low)
        }
    }

    #[test]
    fn test_stats_empty_is_zero_not_nan() {
        let stats = completion_stats(&[]);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, 0.0);
    }

    #[test]
    fn test_stats_three_of_eight() {
        let mut items = default_checklist();
        for id in ["1", "4", "8"] {
            items = toggle_completion(&items, id).unwrap();
        }
        let stats = completion_stats(&items);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.total, 8);
        assert_eq!(stats.percentage, 37.5);
    }

    #[test]
    fn test_group_preserves_first_seen_and_insertion_order() {
        let items = vec![
            item("a", "Images", false),
            item("b", "JavaScript", false),
            item("c", "Images", true),
        ];
        let groups = group_by_category(&items);
        let keys: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(keys, vec!["Images", "JavaScript"]);
        let image_ids: Vec<&str> = groups[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(image_ids, vec!["a", "c"]);
        assert_eq!(groups[1].items.len(), 1);
    }

    #[test]
    fn test_group_empty() {
        let items: Vec<ChecklistItem> = vec![];
        assert!(group_by_category(&items).is_empty());
    }

    #[test]
    fn test_group_default_checklist_categories() {
        let items = default_checklist();
        let keys: Vec<&str> = group_by_category(&items).iter().map(|g| g.category).collect();
        assert_eq!(keys, vec!["Images", "JavaScript", "CSS", "Network", "Performance"]);
    }

    #[test]
    fn test_toggle_is_non_mutating() {
        let items = vec![item("a", "Images", false)];
        let toggled = toggle_completion(&items, "a").unwrap();
        assert!(toggled[0].completed);
        assert!(!items[0].completed);
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let items = vec![item("a", "Images", false), item("b", "CSS", true)];
        let once = toggle_completion(&items, "b").unwrap();
        assert_eq!(once[1].state(), ItemState::Pending);
        let twice = toggle_completion(&once, "b").unwrap();
        assert_eq!(twice, items);
    }

    #[test]
    fn test_toggle_only_touches_matching_item() {
        let items = vec![item("a", "Images", false), item("b", "CSS", false)];
        let toggled = toggle_completion(&items, "a").unwrap();
        assert!(toggled[0].completed);
        assert!(!toggled[1].completed);
    }

    #[test]
    fn test_toggle_unknown_id_not_found() {
        let items = vec![item("a", "Images", false)];
        let err = toggle_completion(&items, "zzz").unwrap_err();
        assert_eq!(err, AuditError::NotFound("zzz".to_string()));
    }

    #[test]
    fn test_reset_all_clears_completion_keeps_identity() {
        let items = vec![item("a", "Images", true), item("b", "CSS", false), item("c", "CSS", true)];
        let reset = reset_all(&items);
        assert!(reset.iter().all(|i| i.state() == ItemState::Pending));
        let ids: Vec<&str> = reset.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(reset[0].title, items[0].title);
    }

    #[test]
    fn test_default_checklist_ids_unique() {
        let items = default_checklist();
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
        assert!(items.iter().all(|i| !i.completed));
    }
}
