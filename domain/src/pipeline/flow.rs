//! Named execution flows

use serde::{Deserialize, Serialize};

/// One execution path through the pipeline (Value Object)
///
/// Stage ids are an ordered subsequence of the registry, possibly with
/// repeats (e.g. the Architect is visited again after the Investigator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stages: Vec<String>,
}

impl Flow {
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, stage_id: &str) -> bool {
        self.stages.iter().any(|s| s == stage_id)
    }

    /// First position of `stage_id` in the flow
    pub fn position(&self, stage_id: &str) -> Option<usize> {
        self.stages.iter().position(|s| s == stage_id)
    }

    /// Consecutive `(from, to)` pairs in traversal order
    pub fn steps(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stages
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_uses_first_visit() {
        let flow = Flow::new("rg", "", ["architect", "investigator", "architect"]);
        assert_eq!(flow.position("architect"), Some(0));
        assert_eq!(flow.position("investigator"), Some(1));
        assert_eq!(flow.position("worker"), None);
    }

    #[test]
    fn test_steps() {
        let flow = Flow::new("rg", "", ["architect", "investigator", "architect"]);
        let steps: Vec<_> = flow.steps().collect();
        assert_eq!(
            steps,
            vec![("architect", "investigator"), ("investigator", "architect")]
        );
        assert_eq!(Flow::new("one", "", ["architect"]).steps().count(), 0);
        assert_eq!(Flow::new("none", "", Vec::<String>::new()).steps().count(), 0);
    }
}
