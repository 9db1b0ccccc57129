use crate::resource::{Machine, MachinePhase};

use super::{Decision, Reason, RelevancePredicate};

/// Predicate for cluster-api machines.
///
/// Only the running phase is of interest. A machine reaching it can change
/// which workloads a cluster hosts; every other machine field is ignored.
///
/// Deletion does not trigger. Losing one machine does not by itself change a
/// cluster's health-check posture; whatever it ran surfaces again through
/// the health-check reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachinePredicate;

impl RelevancePredicate<Machine> for MachinePredicate {
    fn name(&self) -> &'static str {
        "machine"
    }

    fn create(&self, object: &Machine) -> Decision {
        if object.typed_phase() == MachinePhase::Running {
            Decision::trigger(Reason::PhaseRunning)
        } else {
            Decision::skip(Reason::PhaseNotRunning)
        }
    }

    fn update(&self, old: Option<&Machine>, new: &Machine) -> Decision {
        let phase = new.typed_phase();
        if phase != MachinePhase::Running {
            return Decision::skip(Reason::PhaseNotRunning);
        }

        let Some(old) = old else {
            return Decision::trigger(Reason::OldStateMissing);
        };

        if old.typed_phase() != phase {
            return Decision::trigger(Reason::EnteredRunning);
        }

        Decision::skip(Reason::Unchanged)
    }

    fn delete(&self, _object: &Machine) -> Decision {
        Decision::skip(Reason::DeleteIgnored)
    }

    fn generic(&self, _object: &Machine) -> Decision {
        Decision::skip(Reason::Resync)
    }
}
