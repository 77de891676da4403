use std::cmp::Ordering;
use std::collections::BTreeSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::{FilterState, Job, SortKey};

/// Applies `filters` to `jobs` and orders the survivors. Pure and deterministic.
pub fn evaluate<'a>(jobs: &'a [Job], filters: &FilterState) -> Vec<&'a Job> {
    let query = filters.search.trim().to_lowercase();
    let mut out: Vec<&Job> = jobs
        .iter()
        .filter(|job| matches(job, filters, &query))
        .collect();

    // `sort_by` is stable, so ties keep dataset order.
    match filters.sort_by {
        SortKey::Recent => {}
        SortKey::Company => out.sort_by(|a, b| locale_cmp(&a.company, &b.company)),
        SortKey::Role => out.sort_by(|a, b| locale_cmp(&a.role, &b.role)),
        SortKey::Level => out.sort_by(|a, b| locale_cmp(&a.level, &b.level)),
    }
    out
}

fn matches(job: &Job, filters: &FilterState, query: &str) -> bool {
    if filters.only_new && !job.is_new {
        return false;
    }
    if filters.only_featured && !job.is_featured {
        return false;
    }
    if !filters.role.is_empty() && job.role != filters.role {
        return false;
    }
    if !filters.level.is_empty() && job.level != filters.level {
        return false;
    }
    if !filters.contract.is_empty() && job.contract != filters.contract {
        return false;
    }
    // Every selected tag must be present, not just one of them.
    if !filters.selected_tags.iter().all(|tag| job.has_tag(tag)) {
        return false;
    }
    if !query.is_empty() {
        let haystack = format!(
            "{} {} {} {}",
            job.company, job.position, job.role, job.level
        )
        .to_lowercase();
        if !haystack.contains(query) {
            return false;
        }
    }
    true
}

/// Letters first, ignoring accents and case. Ties fall back to the
/// unaccented form first, then lowercase before uppercase.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lowercased canonical decomposition with combining marks stripped.
fn base_letters(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Distinct values offered by the filter controls, alphabetically sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub roles: Vec<String>,
    pub levels: Vec<String>,
    pub contracts: Vec<String>,
    /// Union of every job's languages and tools.
    pub tags: Vec<String>,
}

impl FilterOptions {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
            values
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(ToOwned::to_owned)
                .collect()
        }

        Self {
            roles: distinct(jobs.iter().map(|job| job.role.as_str())),
            levels: distinct(jobs.iter().map(|job| job.level.as_str())),
            contracts: distinct(jobs.iter().map(|job| job.contract.as_str())),
            tags: distinct(jobs.iter().flat_map(|job| job.tags())),
        }
    }
}
