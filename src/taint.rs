//! Register taint tracking for one misspeculation window.

use crate::event::PhysRegId;

/// Set of physical registers carrying data derived from a load executed in
/// the currently open misspeculation window.
///
/// Append-only while a window is open; the only removal is [`clear`], which
/// the automaton performs exactly when it returns to its initial state.
/// Duplicate marks are permitted — only membership is ever consulted, so a
/// dedup pass would buy nothing on these short windows.
///
/// [`clear`]: TaintSet::clear
#[derive(Debug, Default)]
pub struct TaintSet {
    regs: Vec<PhysRegId>,
}

impl TaintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, reg: PhysRegId) {
        self.regs.push(reg);
    }

    /// Whether `reg` is tainted. A missing operand (`None`) is never tainted.
    pub fn contains(&self, reg: Option<PhysRegId>) -> bool {
        match reg {
            Some(reg) => self.regs.contains(&reg),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.regs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_operand_is_never_tainted() {
        let mut taint = TaintSet::new();
        taint.mark(PhysRegId(0));
        assert!(taint.contains(Some(PhysRegId(0))));
        assert!(!taint.contains(None));
    }

    #[test]
    fn duplicate_marks_do_not_change_membership() {
        let mut taint = TaintSet::new();
        taint.mark(PhysRegId(9));
        taint.mark(PhysRegId(9));
        assert!(taint.contains(Some(PhysRegId(9))));
        assert!(!taint.contains(Some(PhysRegId(10))));

        taint.clear();
        assert!(taint.is_empty());
        assert!(!taint.contains(Some(PhysRegId(9))));
    }
}
