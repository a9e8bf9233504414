//! Operation traits.
//!
//! These traits define the interface between the scheduler and the
//! collaborators that convert scene data. The scheduler only decides *when*
//! operations run; what they author is up to the implementor.

use super::{ExportTime, Interval};
use crate::util::{Result, Tick};

// ============================================================================
// Object Operations
// ============================================================================

/// Export operation for one object's time-varying data.
pub trait ObjectExportOp: Send {
    /// Interval over which the exported data is unchanged, evaluated at `time`.
    fn validity_interval(&self, time: Tick) -> Interval;

    /// Write the object's data at the given time.
    fn write(&mut self, time: &ExportTime) -> Result<()>;

    /// Called once after every time sample of the session has been written.
    fn post_export(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: ObjectExportOp + ?Sized> ObjectExportOp for Box<T> {
    fn validity_interval(&self, time: Tick) -> Interval {
        (**self).validity_interval(time)
    }

    fn write(&mut self, time: &ExportTime) -> Result<()> {
        (**self).write(time)
    }

    fn post_export(&mut self) -> Result<()> {
        (**self).post_export()
    }
}

/// Object operation assembled from three closures.
pub struct FnObjectOp<I, W, P> {
    interval: I,
    write: W,
    post_export: P,
}

impl<I, W, P> FnObjectOp<I, W, P>
where
    I: Fn(Tick) -> Interval + Send,
    W: FnMut(&ExportTime) -> Result<()> + Send,
    P: FnMut() -> Result<()> + Send,
{
    pub fn new(interval: I, write: W, post_export: P) -> Self {
        Self { interval, write, post_export }
    }
}

impl<I, W, P> ObjectExportOp for FnObjectOp<I, W, P>
where
    I: Fn(Tick) -> Interval + Send,
    W: FnMut(&ExportTime) -> Result<()> + Send,
    P: FnMut() -> Result<()> + Send,
{
    fn validity_interval(&self, time: Tick) -> Interval {
        (self.interval)(time)
    }

    fn write(&mut self, time: &ExportTime) -> Result<()> {
        (self.write)(time)
    }

    fn post_export(&mut self) -> Result<()> {
        (self.post_export)()
    }
}

// ============================================================================
// Transform Operations
// ============================================================================

/// Export operation for one node transform.
///
/// `H` is an opaque output target owned by the caller; the scheduler only
/// threads it through to `write`.
pub trait TransformExportOp<H> {
    fn write(&mut self, time: &ExportTime, target: &mut H) -> Result<()>;
}

impl<H, F> TransformExportOp<H> for F
where
    F: FnMut(&ExportTime, &mut H) -> Result<()>,
{
    fn write(&mut self, time: &ExportTime, target: &mut H) -> Result<()> {
        self(time, target)
    }
}
