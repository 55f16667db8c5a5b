#![allow(dead_code)]

use speccheck::{ClassFlags, PhysRegId, TraceEvent};

pub const R1: PhysRegId = PhysRegId(1);
pub const R2: PhysRegId = PhysRegId(2);
pub const R3: PhysRegId = PhysRegId(3);

pub const REGION_START: u64 = 0x1000;
pub const REGION_SIZE: u64 = 0x100;

/// Baseline event: nothing issued/completed/committed, no operands.
pub fn ev(pc: u64, class: ClassFlags) -> TraceEvent {
    TraceEvent {
        mnemonic: String::new(),
        pc,
        committed: false,
        issued: false,
        completed: false,
        class,
        dest: None,
        srcs: [None, None],
    }
}

/// A squashed (never committed) load that issued and completed into `dest`.
pub fn completed_load(pc: u64, dest: PhysRegId) -> TraceEvent {
    TraceEvent {
        issued: true,
        completed: true,
        dest: Some(dest),
        ..ev(pc, ClassFlags::load())
    }
}

/// A squashed store that issued with `src` as its data operand.
pub fn issued_store(pc: u64, src: PhysRegId) -> TraceEvent {
    TraceEvent {
        issued: true,
        srcs: [Some(src), None],
        ..ev(pc, ClassFlags::store())
    }
}

/// A squashed ALU op `dest <- f(src)` that has issued.
pub fn issued_alu(pc: u64, dest: PhysRegId, src: PhysRegId) -> TraceEvent {
    TraceEvent {
        issued: true,
        dest: Some(dest),
        srcs: [Some(src), None],
        ..ev(pc, ClassFlags::alu())
    }
}

/// An instruction that retired normally.
pub fn committed(pc: u64, class: ClassFlags) -> TraceEvent {
    TraceEvent {
        committed: true,
        issued: true,
        completed: true,
        ..ev(pc, class)
    }
}
