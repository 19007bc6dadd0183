// Aggregate counters shown above the repository list.

use crate::github::{Profile, Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Public repository count reported by the profile.
    pub repositories: u64,
    /// Stars summed over every fetched repository, forks included.
    pub stars: u64,
    pub followers: u64,
}

impl Stats {
    pub fn compute(profile: Option<&Profile>, repos: &[Repository]) -> Self {
        Self {
            repositories: profile.and_then(|p| p.public_repos).unwrap_or(0),
            stars: repos.iter().map(Repository::stars).sum(),
            followers: profile.and_then(|p| p.followers).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(stars: Option<u64>, fork: bool) -> Repository {
        Repository {
            name: "r".to_string(),
            description: None,
            language: None,
            stargazers_count: stars,
            fork,
            html_url: "https://github.com/octocat/r".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_counts_come_from_profile_not_list() {
        let profile = Profile {
            login: "octocat".to_string(),
            name: None,
            bio: None,
            avatar_url: None,
            html_url: None,
            public_repos: Some(42),
            followers: Some(9),
            following: None,
        };
        let repos = vec![repo(Some(2), false), repo(Some(5), true), repo(None, false)];

        let stats = Stats::compute(Some(&profile), &repos);
        assert_eq!(
            stats,
            Stats {
                repositories: 42,
                stars: 7,
                followers: 9
            }
        );
    }

    #[test]
    fn test_missing_profile_defaults_to_zero() {
        let repos = vec![repo(Some(1), false), repo(Some(2), false), repo(Some(3), false)];

        let stats = Stats::compute(None, &repos);
        assert_eq!(stats.repositories, 0);
        assert_eq!(stats.followers, 0);
        assert_eq!(stats.stars, 6);
    }
}
