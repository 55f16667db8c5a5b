//! Gates analysis to the monitored code region.

/// Tracks whether execution is currently inside the monitored routine.
///
/// The gate is armed by [`set`] with the routine's entry address and size.
/// Analysis activates when the PC hits the region start and deactivates when
/// it reaches the region end *or* one byte before it — the off-by-one is a
/// deliberate tolerance for instruction-boundary ambiguity at region exit,
/// not something to tighten up.
///
/// If [`set`] is never called, no event is ever admitted. That is the
/// intended silent no-op mode for runs without a monitored routine, so no
/// diagnostic is emitted for it.
///
/// [`set`]: RegionGate::set
#[derive(Debug, Default)]
pub struct RegionGate {
    bounds: Option<Bounds>,
    active: bool,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    start: u64,
    end: u64,
}

impl RegionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the monitored region as `[start, start + size)`. Only one
    /// region is tracked; the most recent call wins.
    pub fn set(&mut self, start: u64, size: u64) {
        let end = start.wrapping_add(size);
        self.bounds = Some(Bounds { start, end });
        tracing::info!("monitored region found: start {start:#010x}, end {end:#010x}");
    }

    /// Advance the gate with the PC of the current event and report whether
    /// the event should be analyzed. Nops inside the region are skipped.
    pub fn admit(&mut self, pc: u64, is_nop: bool) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if pc == bounds.start {
            self.active = true;
        }
        if self.active && (pc == bounds.end || pc == bounds.end.wrapping_sub(1)) {
            self.active = false;
        }
        self.active && !is_nop
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
