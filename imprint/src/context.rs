use crate::{AssignError, AssignErrorKind, Assigner, PathSegment, Result, Tolerance, trace};

/// State threaded through one top-level assignment.
///
/// Keeps the options, the path from the top-level record to the field being
/// written, and the errors tolerated so far.
#[derive(Debug, Default)]
pub struct AssignContext {
    options: Assigner,
    path: Vec<PathSegment>,
    skipped: Vec<AssignError>,
}

impl AssignContext {
    /// Start a context for one top-level call.
    pub fn new(options: Assigner) -> Self {
        Self {
            options,
            path: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Options this assignment runs with
    pub fn options(&self) -> &Assigner {
        &self.options
    }

    /// Path to the field currently being assigned
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Create an error located at the current path.
    pub fn error(&self, kind: AssignErrorKind) -> AssignError {
        AssignError {
            kind,
            path: self.path.clone(),
        }
    }

    /// Run `f` one level deeper, under `segment`.
    ///
    /// The segment is popped again whatever `f` returns.
    pub fn descend<R>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment);
        let out = f(self);
        self.path.pop();
        out
    }

    /// Apply the tolerance policy to a field that failed.
    ///
    /// Returns the error back under [`Tolerance::Abort`]; under
    /// [`Tolerance::SkipField`] records it and lets the caller move on.
    pub(crate) fn tolerate(&mut self, err: AssignError) -> Result<()> {
        match self.options.tolerance_policy() {
            Tolerance::Abort => Err(err),
            Tolerance::SkipField => {
                trace!("skipping field after error: {err}");
                self.skipped.push(err);
                Ok(())
            }
        }
    }

    /// Finish the call and hand back what was tolerated.
    pub fn into_report(self) -> AssignReport {
        AssignReport {
            skipped: self.skipped,
        }
    }
}

/// What a successful assignment left out.
///
/// Only ever non-empty under [`Tolerance::SkipField`].
#[derive(Debug, Default, Clone)]
pub struct AssignReport {
    skipped: Vec<AssignError>,
}

impl AssignReport {
    /// Field errors that were tolerated, in the order they happened
    pub fn skipped(&self) -> &[AssignError] {
        &self.skipped
    }

    /// Returns true if no field was skipped because of an error.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Take the tolerated errors
    pub fn into_skipped(self) -> Vec<AssignError> {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueType;

    #[test]
    fn descend_pops_on_error() {
        let mut cx = AssignContext::default();
        let err = cx.descend(PathSegment::Field("outer"), |cx| {
            cx.descend(PathSegment::Index(3), |cx| {
                Err::<(), _>(cx.error(AssignErrorKind::NotAnObject {
                    got: ValueType::Array,
                }))
            })
        });
        assert!(cx.path().is_empty());
        let err = err.unwrap_err();
        assert_eq!(err.path_string(), ".outer[3]");
    }

    #[test]
    fn abort_returns_the_error() {
        let mut cx = AssignContext::default();
        let err = cx.error(AssignErrorKind::NotAnObject {
            got: ValueType::Array,
        });
        assert!(cx.tolerate(err).is_err());
        assert!(cx.into_report().is_complete());
    }

    #[test]
    fn skip_field_records_the_error() {
        let mut cx = AssignContext::new(Assigner::new().tolerance(Tolerance::SkipField));
        let err = cx.error(AssignErrorKind::NotAnObject {
            got: ValueType::Array,
        });
        assert!(cx.tolerate(err).is_ok());
        let report = cx.into_report();
        assert!(!report.is_complete());
        assert_eq!(report.skipped().len(), 1);
    }
}
