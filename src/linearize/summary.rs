use crate::models::LinearEntry;

/// Shape of a linearized conversation, used for statistics output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceSummary {
    /// Normalized messages, counted through every branch
    pub messages: usize,
    /// Branch markers, counted through every branch
    pub branch_points: usize,
    /// Deepest branch nesting (0 for a conversation without branches)
    pub max_branch_depth: usize,
}

impl SequenceSummary {
    pub fn of(sequence: &[LinearEntry]) -> Self {
        let mut summary = Self::default();
        summary.visit(sequence, 0);
        summary
    }

    fn visit(&mut self, sequence: &[LinearEntry], depth: usize) {
        for entry in sequence {
            match entry {
                LinearEntry::Message(_) => self.messages += 1,
                LinearEntry::Branches(marker) => {
                    self.branch_points += 1;
                    self.max_branch_depth = self.max_branch_depth.max(depth + 1);
                    for (_, branch) in marker.iter() {
                        self.visit(branch, depth + 1);
                    }
                }
            }
        }
    }
}
