use crate::models::project::Project;

/// Distinct tag labels across all projects, in first-seen order.
/// The synthetic "all" filter entry is not part of the derived set.
pub fn derive_tags(projects: &[Project]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for project in projects {
        for tag in &project.tags {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

/// Stable sort by parsed date, most recent first. Records without a
/// parseable date sort after every dated record (missing = oldest).
/// Sorting an already-sorted list is a no-op.
pub fn sort_by_date_desc(projects: &mut [Project]) {
    projects.sort_by(|a, b| match (b.parsed_date(), a.parsed_date()) {
        (Some(db), Some(da)) => db.cmp(&da),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Every project whose tag set contains `tag`. When `tag` is the
/// all-sentinel the full input list is returned unchanged, in whatever
/// order it was given.
pub fn filter_by_tag(projects: &[Project], tag: &str, all_label: &str) -> Vec<Project> {
    if tag == all_label {
        return projects.to_vec();
    }
    projects
        .iter()
        .filter(|p| p.has_tag(tag))
        .cloned()
        .collect()
}
