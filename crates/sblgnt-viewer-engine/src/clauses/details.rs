use serde::Serialize;
use std::collections::HashMap;

use super::payload::{ClausePayload, ClauseRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildClause {
    pub clause_id: String,
    pub label: String,
    pub role: Option<String>,
}

/// Inspection record for one clause.
///
/// `parent_clause_id` is a lookup key only. A parent that is not part of the
/// payload leaves `parent_summary` empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClauseDetail {
    pub clause_id: String,
    pub function_text: String,
    pub references: Vec<String>,
    pub category_tags: Vec<String>,
    pub source_summary: String,
    pub parent_clause_id: Option<String>,
    pub parent_summary: String,
    pub child_clauses: Vec<ChildClause>,
    pub is_group_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseDetails {
    details: HashMap<String, ClauseDetail>,
}

impl ClauseDetails {
    pub fn build(payload: &ClausePayload) -> Self {
        let mut details: HashMap<String, ClauseDetail> = payload
            .clauses
            .iter()
            .map(|clause| (clause.clause_id.clone(), ClauseDetail::from_record(clause)))
            .collect();

        // Edges declared by the parent through sub_clauses
        for parent in &payload.clauses {
            for sub in &parent.sub_clauses {
                let fallback_label = details
                    .get(&sub.clause_id)
                    .map(|child| child.function_text.clone());
                if let Some(child) = details.get_mut(&sub.clause_id)
                    && child.parent_clause_id.is_none()
                {
                    child.parent_clause_id = Some(parent.clause_id.clone());
                }

                let label = sub
                    .label
                    .clone()
                    .filter(|label| !label.trim().is_empty())
                    .or(fallback_label.filter(|label| !label.is_empty()))
                    .unwrap_or_else(|| sub.clause_id.clone());

                if let Some(parent_detail) = details.get_mut(&parent.clause_id) {
                    merge_child(
                        parent_detail,
                        ChildClause {
                            clause_id: sub.clause_id.clone(),
                            label,
                            role: sub.role.clone(),
                        },
                        true,
                    );
                }
            }
        }

        // Edges declared by the child through parent_clause_id
        let pointers: Vec<(String, String, String)> = details
            .values()
            .filter_map(|detail| {
                let parent = detail.parent_clause_id.clone()?;
                Some((parent, detail.clause_id.clone(), label_for(detail)))
            })
            .collect();
        for (parent_id, child_id, label) in pointers {
            if let Some(parent_detail) = details.get_mut(&parent_id) {
                merge_child(
                    parent_detail,
                    ChildClause {
                        clause_id: child_id,
                        label,
                        role: None,
                    },
                    false,
                );
            }
        }

        let summaries: HashMap<String, String> = details
            .iter()
            .map(|(id, detail)| (id.clone(), detail.function_text.clone()))
            .collect();
        for detail in details.values_mut() {
            detail.parent_summary = detail
                .parent_clause_id
                .as_ref()
                .and_then(|parent| summaries.get(parent))
                .cloned()
                .unwrap_or_default();
        }

        // Payload order for children, independent of hash order above
        let order: HashMap<&str, usize> = payload
            .clauses
            .iter()
            .enumerate()
            .map(|(position, clause)| (clause.clause_id.as_str(), position))
            .collect();
        for detail in details.values_mut() {
            detail
                .child_clauses
                .sort_by_key(|child| order.get(child.clause_id.as_str()).copied().unwrap_or(usize::MAX));
        }

        Self { details }
    }

    pub fn get(&self, clause_id: &str) -> Option<&ClauseDetail> {
        self.details.get(clause_id)
    }

    pub fn contains(&self, clause_id: &str) -> bool {
        self.details.contains_key(clause_id)
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

impl ClauseDetail {
    fn from_record(record: &ClauseRecord) -> Self {
        Self {
            clause_id: record.clause_id.clone(),
            function_text: record.function.clone().unwrap_or_default(),
            references: record.references.clone(),
            category_tags: record.category_tags.clone(),
            source_summary: source_summary(record.source_method.as_deref(), &record.reviewed_by),
            parent_clause_id: record.parent_clause_id.clone(),
            parent_summary: String::new(),
            child_clauses: Vec::new(),
            is_group_only: record.group_only,
        }
    }
}

fn label_for(detail: &ClauseDetail) -> String {
    if detail.function_text.is_empty() {
        detail.clause_id.clone()
    } else {
        detail.function_text.clone()
    }
}

/// Add `child`, or upgrade an existing entry when the new one comes from
/// the parent's own sub-clause list.
fn merge_child(parent: &mut ClauseDetail, child: ChildClause, authoritative: bool) {
    match parent
        .child_clauses
        .iter_mut()
        .find(|existing| existing.clause_id == child.clause_id)
    {
        Some(existing) if authoritative => *existing = child,
        Some(_) => {}
        None => parent.child_clauses.push(child),
    }
}

/// `"<method> · reviewed by <a>, <b>"`, with either half dropped when absent
pub fn source_summary(method: Option<&str>, reviewed_by: &[String]) -> String {
    let method = method.map(str::trim).filter(|m| !m.is_empty());
    let reviewers: Vec<&str> = reviewed_by
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect();

    match (method, reviewers.is_empty()) {
        (Some(method), false) => format!("{method} · reviewed by {}", reviewers.join(", ")),
        (Some(method), true) => method.to_string(),
        (None, false) => format!("reviewed by {}", reviewers.join(", ")),
        (None, true) => String::new(),
    }
}
