/// Configuration for a [`ModelStepper`](crate::ModelStepper).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    warn_on_unbounded_pull: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warn_on_unbounded_pull: true,
        }
    }
}

impl Config {
    /// Sets whether each pull from an unbounded stepper emits a warning.
    ///
    /// Enabled by default. Callers that intentionally drive unbounded
    /// steppers can switch it off here instead of filtering the log.
    #[must_use]
    pub fn with_warn_on_unbounded_pull(mut self, warn: bool) -> Self {
        self.warn_on_unbounded_pull = warn;
        self
    }

    /// Returns `true` if pulls from an unbounded stepper emit a warning.
    #[must_use]
    pub fn warn_on_unbounded_pull(&self) -> bool {
        self.warn_on_unbounded_pull
    }
}

/// How a [`Merged`](crate::Merged) composite resolves variables emitted by
/// more than one child in the same step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum MergePolicy {
    /// The later child's value replaces the earlier one.
    #[default]
    Overwrite,

    /// Children must declare disjoint variables, and a shared key emitted at
    /// step time fails that step.
    Reject,

    /// A shared key from child `i` is stored as `{name}_{i}`.
    Rename,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_by_default() {
        assert!(Config::default().warn_on_unbounded_pull());
        assert!(
            !Config::default()
                .with_warn_on_unbounded_pull(false)
                .warn_on_unbounded_pull()
        );
    }

    #[test]
    fn overwrite_is_default_policy() {
        assert_eq!(MergePolicy::default(), MergePolicy::Overwrite);
    }
}
