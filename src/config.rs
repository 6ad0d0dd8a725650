use crate::OverlapPolicy;

/// Construction-time options for an [`Automaton`](crate::Automaton).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// How `get_matches(.., true)` picks among overlapping matches.
    pub overlap_policy: OverlapPolicy,
}

impl Config {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overlap policy.
    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_leftmost_longest() {
        assert_eq!(Config::new().overlap_policy, OverlapPolicy::LeftmostLongest);
        assert_eq!(Config::new(), Config::default());
    }

    #[test]
    fn with_overlap_policy() {
        let config = Config::new().with_overlap_policy(OverlapPolicy::LongestFirst);
        assert_eq!(config.overlap_policy, OverlapPolicy::LongestFirst);
    }
}
