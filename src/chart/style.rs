use std::collections::BTreeSet;

/// Line style of a plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Decides dashed vs solid by membership in a configured subject set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleResolver {
    dashed: BTreeSet<String>,
}

impl StyleResolver {
    pub fn new<I, S>(dashed_subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dashed: dashed_subjects.into_iter().map(Into::into).collect(),
        }
    }

    /// Unknown subjects are solid.
    pub fn resolve(&self, subject: &str) -> LineStyle {
        if self.dashed.contains(subject) {
            LineStyle::Dashed
        } else {
            LineStyle::Solid
        }
    }

    pub fn is_dashed(&self, subject: &str) -> bool {
        self.resolve(subject) == LineStyle::Dashed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_decides_style() {
        let styles = StyleResolver::new(["TP1-PT", "TP3-V"]);
        assert_eq!(styles.resolve("TP1-PT"), LineStyle::Dashed);
        assert_eq!(styles.resolve("TP3-V"), LineStyle::Dashed);
        assert_eq!(styles.resolve("C1"), LineStyle::Solid);
        assert_eq!(styles.resolve("tp1-pt"), LineStyle::Solid);
    }

    #[test]
    fn repeated_calls_agree() {
        let styles = StyleResolver::new(vec!["X".to_string()]);
        let first: Vec<bool> = ["X", "Y"].iter().map(|s| styles.is_dashed(s)).collect();
        for _ in 0..3 {
            let again: Vec<bool> = ["X", "Y"].iter().map(|s| styles.is_dashed(s)).collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn empty_set_is_all_solid() {
        let styles = StyleResolver::new(Vec::<String>::new());
        assert_eq!(styles.resolve("anything"), LineStyle::Solid);
    }
}
