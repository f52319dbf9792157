//! Compensating-step coordinator for multi-entity atomic units.
//!
//! The in-memory stores have no transaction log, so atomicity over
//! several entities comes from running an ordered list of steps and,
//! on failure, replaying the compensations of every completed step in
//! reverse order. The root cause of the failure is preserved for the
//! caller.

/// One step of an atomic unit: a fallible action paired with the
/// compensation that undoes it.
pub struct Step<'run, E> {
    name: &'static str,
    action: Box<dyn FnOnce() -> Result<(), E> + 'run>,
    compensate: Option<Box<dyn FnOnce() + 'run>>,
}

impl<'run, E> Step<'run, E> {
    /// Creates a step with a compensation.
    pub fn new(
        name: &'static str,
        action: impl FnOnce() -> Result<(), E> + 'run,
        compensate: impl FnOnce() + 'run,
    ) -> Self {
        Self {
            name,
            action: Box::new(action),
            compensate: Some(Box::new(compensate)),
        }
    }

    /// Creates a step with no compensation. Place irreversible steps
    /// last, after every step that can fail.
    pub fn irreversible(name: &'static str, action: impl FnOnce() -> Result<(), E> + 'run) -> Self {
        Self {
            name,
            action: Box::new(action),
            compensate: None,
        }
    }
}

/// A failed atomic unit: which step failed, the root cause, and how
/// many completed steps were compensated.
pub struct StepFailure<E> {
    /// Name of the step that failed.
    pub step: &'static str,
    /// The error the step returned.
    pub cause: E,
    /// Number of previously completed steps that were rolled back.
    pub compensated: usize,
}

/// Runs ordered steps, compensating completed ones in reverse on
/// failure.
pub struct RollbackCoordinator;

impl RollbackCoordinator {
    /// Runs the steps in order.
    ///
    /// On the first failing step, the compensations of every completed
    /// step run in reverse order and the failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `StepFailure` carrying the failed step's name and error.
    pub fn run<E>(steps: Vec<Step<'_, E>>) -> Result<(), StepFailure<E>> {
        let mut completed: Vec<(&'static str, Option<Box<dyn FnOnce() + '_>>)> = Vec::new();

        for step in steps {
            match (step.action)() {
                Ok(()) => completed.push((step.name, step.compensate)),
                Err(cause) => {
                    let compensated = completed.len();
                    for (name, compensate) in completed.into_iter().rev() {
                        if let Some(compensate) = compensate {
                            tracing::warn!(step = name, "rolling back completed step");
                            compensate();
                        }
                    }
                    return Err(StepFailure {
                        step: step.name,
                        cause,
                        compensated,
                    });
                }
            }
        }

        Ok(())
    }
}
