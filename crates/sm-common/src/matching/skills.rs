use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

use crate::profile::WorkerProfile;

/// Canonical comparison key for a skill name (NFKC, trimmed, lowercased),
/// so "ＰＬＵＭＢＩＮＧ " and "plumbing" are the same skill.
pub fn normalize_skill(skill: &str) -> String {
    skill.nfkc().collect::<String>().trim().to_lowercase()
}

/// Normalized, non-empty skill keys.
pub fn normalize_skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Whether `worker_skills` shares at least one skill with `required`.
pub fn has_any_skill(worker_skills: &[String], required: &HashSet<String>) -> bool {
    worker_skills
        .iter()
        .any(|skill| required.contains(&normalize_skill(skill)))
}

/// Keeps workers who have at least one of the requested skills.
///
/// An empty request is "browse all" and returns the input unchanged. A
/// worker matching only one of several requested skills still qualifies.
pub fn apply_skill_filter<T>(workers: Vec<T>, required_skills: &[String]) -> Vec<T>
where
    T: AsRef<WorkerProfile>,
{
    let required = normalize_skill_set(required_skills);
    if required.is_empty() {
        return workers;
    }

    workers
        .into_iter()
        .filter(|worker| has_any_skill(&worker.as_ref().skills, &required))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{RawProfile, normalize_profile};

    fn worker(id: i64, skills: &[&str]) -> WorkerProfile {
        let mut raw = RawProfile::new(id, format!("worker-{id}"));
        raw.skills = Some(crate::profile::normalize::RawSkills::List(
            skills.iter().map(|s| s.to_string()).collect(),
        ));
        normalize_profile(&raw).unwrap()
    }

    #[test]
    fn empty_request_is_identity() {
        let workers = vec![worker(1, &["Painting"]), worker(2, &[]), worker(3, &["Moving"])];
        let filtered = apply_skill_filter(workers.clone(), &[]);
        assert_eq!(filtered, workers);
    }

    #[test]
    fn blank_request_entries_are_ignored() {
        let workers = vec![worker(1, &["Painting"]), worker(2, &[])];
        let filtered = apply_skill_filter(workers.clone(), &["  ".to_string()]);
        assert_eq!(filtered, workers);
    }

    #[test]
    fn uses_or_semantics_across_requested_skills() {
        let workers = vec![worker(1, &["Painting"]), worker(2, &["Electrical"])];
        let filtered = apply_skill_filter(
            workers,
            &["Painting".to_string(), "Plumbing".to_string()],
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn comparison_ignores_case_and_width() {
        let workers = vec![worker(1, &["ＰＬＵＭＢＩＮＧ "])];
        let filtered = apply_skill_filter(workers, &["plumbing".to_string()]);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn preserves_input_order() {
        let workers = vec![
            worker(3, &["Cleaning"]),
            worker(1, &["Cleaning", "Moving"]),
            worker(2, &["Gardening"]),
        ];
        let ids: Vec<_> = apply_skill_filter(workers, &["cleaning".to_string()])
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["3", "1"]);
    }
}
