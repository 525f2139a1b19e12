use crate::profile::WorkerProfile;

/// Case-insensitive substring search over name, skills and location.
///
/// Blank text leaves the list untouched. The needle itself is not trimmed,
/// so "plumb " only matches where a space follows.
pub fn filter_by_free_text<T>(workers: Vec<T>, text: &str) -> Vec<T>
where
    T: AsRef<WorkerProfile>,
{
    if text.trim().is_empty() {
        return workers;
    }

    let needle = text.to_lowercase();
    workers
        .into_iter()
        .filter(|worker| matches_text(worker.as_ref(), &needle))
        .collect()
}

/// `needle` must already be lowercased.
pub fn matches_text(profile: &WorkerProfile, needle: &str) -> bool {
    profile.name.to_lowercase().contains(needle)
        || profile
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle))
        || profile.location.to_lowercase().contains(needle)
}
