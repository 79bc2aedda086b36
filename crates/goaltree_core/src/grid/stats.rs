//! Per-column fill statistics shown in the grid footer.

use crate::model::goal::GoalField;
use crate::tree::TreeItem;
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FillStats {
    pub empty: usize,
    pub filled: usize,
    pub total: usize,
}

impl FillStats {
    pub fn is_complete(&self) -> bool {
        self.empty == 0
    }
}

impl Display for FillStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.total == 0 {
            return f.write_str("—");
        }
        let mark = if self.is_complete() { '✓' } else { '❌' };
        write!(f, "{mark} {}/{}", self.filled, self.total)
    }
}

/// Counts blank and non-blank values of `field` over every node.
pub fn field_fill_stats<T: TreeItem>(forest: &[T], field: GoalField) -> FillStats {
    let mut stats = FillStats::default();
    accumulate(forest, field, &mut stats);
    stats
}

fn accumulate<T: TreeItem>(nodes: &[T], field: GoalField, stats: &mut FillStats) {
    for node in nodes {
        if node.record().field(field).trim().is_empty() {
            stats.empty += 1;
        } else {
            stats.filled += 1;
        }
        stats.total += 1;
        accumulate(node.children(), field, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::{field_fill_stats, FillStats};
    use crate::model::goal::{GoalField, GoalNode};

    #[test]
    fn counts_blank_values_across_depths() {
        let mut root = GoalNode::new("1", "Root");
        root.record.specific = "yes".into();
        let mut child = GoalNode::new("2", "Child");
        child.record.specific = "  ".into();
        let forest = vec![root.with_children([child])];

        let stats = field_fill_stats(&forest, GoalField::Specific);
        assert_eq!(stats, FillStats { empty: 1, filled: 1, total: 2 });
        assert_eq!(stats.to_string(), "❌ 1/2");
    }

    #[test]
    fn summary_marks_complete_and_empty_columns() {
        let complete = FillStats { empty: 0, filled: 3, total: 3 };
        assert_eq!(complete.to_string(), "✓ 3/3");
        assert_eq!(FillStats::default().to_string(), "—");
    }
}
