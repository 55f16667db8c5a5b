//! The misspeculation automaton and the per-run analyzer context.

use crate::event::{InstClass, InstEvent};
use crate::region::RegionGate;
use crate::taint::TaintSet;
use crate::window::{WindowRegistry, WindowStats};

/// Automaton state. The open-window variants carry the PC at which the
/// window opened, so a window PC exists exactly while a window is open.
///
/// `Accept` is transient: it signals "leak observed this event" and is
/// resolved back to `Init` before [`Analyzer::consume_instruction`] returns,
/// so callers never observe it. The state space leaves room for future
/// extension (nested windows, multiple squash sources); only the live states
/// are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// No open window; the taint set is empty.
    #[default]
    Init,
    /// A misspeculation window is open but no taint has been established.
    Pending { window_pc: u64 },
    /// Window open and at least one register is tainted.
    Tainted { window_pc: u64 },
    /// A tainted value reached an observable instruction this event.
    Accept { window_pc: u64 },
}

/// Per-run detector context: automaton state, taint set, window registry and
/// region gate. Construct one per simulated execution; there is no reset.
///
/// Single-threaded by design — the pipeline model calls
/// [`consume_instruction`] once per event and every call runs to completion.
///
/// [`consume_instruction`]: Analyzer::consume_instruction
#[derive(Debug, Default)]
pub struct Analyzer {
    state: State,
    taint: TaintSet,
    registry: WindowRegistry,
    gate: RegionGate,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook for the external mechanism that identifies the monitored
    /// routine's entry: configures the region gate as `[addr, addr + size)`.
    pub fn region_encountered(&mut self, addr: u64, size: u64) {
        self.gate.set(addr, size);
    }

    /// Consume one pipeline instruction event.
    ///
    /// Never fails: missing operands degrade to "never tainted, never
    /// matched", and events outside the monitored region are ignored.
    pub fn consume_instruction<C: InstClass>(&mut self, event: &InstEvent<'_, C>) {
        if !self.gate.admit(event.pc, event.class.is_nop()) {
            return;
        }

        self.step(event);

        // Accept resolves within the same call: report the window, discard
        // its taint and start over.
        if let State::Accept { window_pc } = self.state {
            self.registry.record_vulnerable(window_pc);
            self.taint.clear();
            self.state = State::Init;
        }
    }

    fn step<C: InstClass>(&mut self, event: &InstEvent<'_, C>) {
        match self.state {
            State::Init => {
                // Idempotent precondition: Init holds no taint.
                self.taint.clear();
                if event.committed {
                    // Retired normally; no window.
                    return;
                }
                // A non-committed instruction opens a misspeculation window.
                self.registry.record_flushed(event.pc);
                self.state = self.establish_taint(event, event.pc);
            }
            State::Pending { window_pc } => {
                if event.committed {
                    self.state = State::Init;
                    return;
                }
                self.state = self.establish_taint(event, window_pc);
            }
            State::Tainted { window_pc } => {
                if event.committed {
                    self.taint.clear();
                    self.state = State::Init;
                    return;
                }
                if !event.issued {
                    return;
                }
                let src_tainted =
                    self.taint.contains(event.srcs[0]) || self.taint.contains(event.srcs[1]);
                if event.class.is_observable() && src_tainted {
                    self.state = State::Accept { window_pc };
                } else if event.class.is_load() || src_tainted {
                    // Taint propagates on issue, before completion:
                    // speculatively forwarded results are visible to
                    // dependents as soon as they are dispatched. Origination
                    // above is stricter (requires completion) on purpose.
                    if let Some(dest) = event.dest {
                        self.taint.mark(dest);
                    }
                }
            }
            // Unreachable between calls; consume_instruction resolves it.
            State::Accept { .. } => {}
        }
    }

    /// Taint origination inside an open window: a *completed* load with a
    /// valid destination establishes taint; anything else leaves the window
    /// pending.
    fn establish_taint<C: InstClass>(&mut self, event: &InstEvent<'_, C>, window_pc: u64) -> State {
        if event.class.is_load() && event.completed {
            if let Some(dest) = event.dest {
                self.taint.mark(dest);
                return State::Tainted { window_pc };
            }
        }
        State::Pending { window_pc }
    }

    /// Current automaton state, for tests and external reporting.
    pub fn state(&self) -> State {
        self.state
    }

    /// The window counters, for external statistics collection.
    pub fn stats(&self) -> WindowStats {
        self.registry.stats()
    }

    /// Read access to the taint set of the currently open window.
    pub fn taint(&self) -> &TaintSet {
        &self.taint
    }

    /// Whether the PC is currently inside the monitored region.
    pub fn in_region(&self) -> bool {
        self.gate.is_active()
    }
}
