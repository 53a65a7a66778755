//! Plain-text rendering of the profile summary and the language report.

use std::collections::HashMap;

use crate::github::UserProfile;

/// Turn the totals into a list sorted by byte count, largest first.
/// Tie order between equal counts is unspecified.
pub fn sorted_languages(totals: &HashMap<String, u64>) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

pub fn profile_summary(profile: &UserProfile) -> String {
    format!(
        "=== User Profile ===\n\
         Name: {}\n\
         Bio: {}\n\
         Location: {}\n\
         Public Repos: {}\n\
         Followers: {}\n\
         Following: {}\n\
         Profile URL: {}",
        opt_str(&profile.name),
        opt_str(&profile.bio),
        opt_str(&profile.location),
        opt_count(profile.public_repos),
        opt_count(profile.followers),
        opt_count(profile.following),
        opt_str(&profile.html_url),
    )
}

pub fn language_report(entries: &[(String, u64)]) -> String {
    if entries.is_empty() {
        return "No languages found.\n".to_string();
    }

    let mut out = String::new();
    for (language, bytes) in entries {
        out.push_str(&format!("{language}: {bytes} bytes\n"));
    }
    out
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn opt_count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_sort_descending_by_bytes() {
        let totals = HashMap::from([
            ("Shell".to_string(), 20),
            ("Python".to_string(), 150),
            ("Rust".to_string(), 90),
        ]);

        let sorted = sorted_languages(&totals);
        assert_eq!(
            sorted,
            vec![
                ("Python".to_string(), 150),
                ("Rust".to_string(), 90),
                ("Shell".to_string(), 20),
            ]
        );
    }

    #[test]
    fn report_prints_one_line_per_language() {
        let entries = vec![("Python".to_string(), 150), ("Shell".to_string(), 20)];
        assert_eq!(
            language_report(&entries),
            "Python: 150 bytes\nShell: 20 bytes\n"
        );
    }

    #[test]
    fn empty_report_says_so() {
        assert_eq!(language_report(&[]), "No languages found.\n");
    }

    #[test]
    fn profile_summary_renders_missing_fields_as_placeholders() {
        let profile = crate::github::UserProfile {
            name: Some("The Octocat".to_string()),
            bio: None,
            location: Some("San Francisco".to_string()),
            public_repos: Some(8),
            followers: None,
            following: Some(9),
            html_url: Some("https://github.com/octocat".to_string()),
        };

        let summary = profile_summary(&profile);
        assert!(summary.contains("Name: The Octocat"));
        assert!(summary.contains("Bio: -"));
        assert!(summary.contains("Public Repos: 8"));
        assert!(summary.contains("Followers: -"));
    }
}
