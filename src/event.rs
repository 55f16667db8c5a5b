//! Instruction-event model and the capability traits the pipeline model
//! implements to feed the detector.

use serde::{Deserialize, Serialize};

/// Opaque identity of a renamed physical register.
///
/// Equality is the only operation the detector needs. A missing operand is
/// represented as `Option::<PhysRegId>::None`, which never compares equal to
/// a valid handle and is never tainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysRegId(pub u16);

/// Static classification of an instruction, as reported by the decoder.
pub trait InstClass {
    fn is_load(&self) -> bool;
    fn is_store(&self) -> bool;
    fn is_floating(&self) -> bool;
    fn is_control(&self) -> bool;
    fn is_call(&self) -> bool;
    fn is_return(&self) -> bool;
    fn is_cond_ctrl(&self) -> bool;
    fn is_nop(&self) -> bool;

    /// Whether executing this instruction has a micro-architecturally visible
    /// effect (memory access, FP unit activity, control transfer) usable as a
    /// side channel.
    fn is_observable(&self) -> bool {
        self.is_load()
            || self.is_store()
            || self.is_floating()
            || self.is_control()
            || self.is_call()
            || self.is_return()
            || self.is_cond_ctrl()
    }
}

/// Renamed-operand introspection for one dynamic instruction instance.
///
/// The detector uses at most one destination and two sources; extra operands
/// reported by the pipeline are ignored.
pub trait DynOperands {
    fn num_srcs(&self) -> usize;
    fn num_dests(&self) -> usize;
    fn renamed_src(&self, idx: usize) -> PhysRegId;
    fn renamed_dest(&self, idx: usize) -> PhysRegId;
}

/// One pipeline instruction event, borrowed for the duration of a single
/// [`crate::Analyzer::consume_instruction`] call.
///
/// The three status flags are independent: an instruction may be issued and
/// completed yet never committed if it is later squashed.
#[derive(Debug, Clone, Copy)]
pub struct InstEvent<'a, C> {
    /// Disassembled mnemonic, for diagnostics only.
    pub mnemonic: &'a str,
    pub pc: u64,
    pub committed: bool,
    pub issued: bool,
    pub completed: bool,
    pub class: &'a C,
    pub dest: Option<PhysRegId>,
    pub srcs: [Option<PhysRegId>; 2],
}

impl<'a, C: InstClass> InstEvent<'a, C> {
    /// Build an event from the pipeline's dynamic-instance capability,
    /// extracting the first destination and up to two sources.
    pub fn from_dyn(
        mnemonic: &'a str,
        pc: u64,
        committed: bool,
        issued: bool,
        completed: bool,
        class: &'a C,
        ops: &impl DynOperands,
    ) -> Self {
        let dest = (ops.num_dests() > 0).then(|| ops.renamed_dest(0));
        let src0 = (ops.num_srcs() > 0).then(|| ops.renamed_src(0));
        let src1 = (ops.num_srcs() > 1).then(|| ops.renamed_src(1));
        Self {
            mnemonic,
            pc,
            committed,
            issued,
            completed,
            class,
            dest,
            srcs: [src0, src1],
        }
    }
}

/// Concrete classification carrier: one flag per [`InstClass`] predicate.
///
/// Pipeline integrations normally implement [`InstClass`] directly on their
/// own static-instruction descriptor; this struct is the serializable form
/// used by the trace container and by tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub load: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub store: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub floating: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub control: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub call: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ret: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub cond_ctrl: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub nop: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl ClassFlags {
    /// A plain ALU op: not observable, not a nop.
    pub fn alu() -> Self {
        Self::default()
    }

    pub fn load() -> Self {
        Self {
            load: true,
            ..Self::default()
        }
    }

    pub fn store() -> Self {
        Self {
            store: true,
            ..Self::default()
        }
    }

    pub fn branch() -> Self {
        Self {
            control: true,
            cond_ctrl: true,
            ..Self::default()
        }
    }

    pub fn nop() -> Self {
        Self {
            nop: true,
            ..Self::default()
        }
    }
}

impl InstClass for ClassFlags {
    fn is_load(&self) -> bool {
        self.load
    }

    fn is_store(&self) -> bool {
        self.store
    }

    fn is_floating(&self) -> bool {
        self.floating
    }

    fn is_control(&self) -> bool {
        self.control
    }

    fn is_call(&self) -> bool {
        self.call
    }

    fn is_return(&self) -> bool {
        self.ret
    }

    fn is_cond_ctrl(&self) -> bool {
        self.cond_ctrl
    }

    fn is_nop(&self) -> bool {
        self.nop
    }
}
