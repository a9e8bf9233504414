//! Operation registry.
//!
//! Holds the object and transform operations of one export session in
//! registration order, together with the per-object scheduling state.

use crate::core::{ExportTime, Interval, ObjectExportOp, TransformExportOp};
use crate::util::{Result, Tick};

/// Index of an object operation in registration order.
pub type OpId = usize;

/// Registered object operation plus its first-visit flag.
pub(crate) struct ObjectSlot {
    op: Box<dyn ObjectExportOp>,
    pub(crate) first_frame: bool,
}

impl ObjectSlot {
    /// Validity interval at `time`; malformed intervals degrade to forever.
    pub(crate) fn validity_interval(&self, id: OpId, time: Tick) -> Interval {
        let interval = self.op.validity_interval(time);
        if !interval.is_valid() {
            tracing::warn!(
                op = id,
                time,
                start = interval.start,
                end = interval.end,
                "malformed validity interval, treating as forever"
            );
        }
        interval.sanitized()
    }

    pub(crate) fn write(&mut self, time: &ExportTime) -> Result<()> {
        self.op.write(time)
    }

    pub(crate) fn post_export(&mut self) -> Result<()> {
        self.op.post_export()
    }
}

/// Registered transform operation and its output target.
pub(crate) struct TransformSlot<H> {
    op: Box<dyn TransformExportOp<H>>,
    target: H,
}

impl<H> TransformSlot<H> {
    pub(crate) fn write(&mut self, time: &ExportTime) -> Result<()> {
        self.op.write(time, &mut self.target)
    }
}

/// Ordered collections of object and transform operations.
pub struct OperationRegistry<H = ()> {
    pub(crate) objects: Vec<ObjectSlot>,
    pub(crate) transforms: Vec<TransformSlot<H>>,
}

impl<H> OperationRegistry<H> {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// Register an object operation and return its id.
    pub fn add_object<O>(&mut self, op: O) -> OpId
    where
        O: ObjectExportOp + 'static,
    {
        self.objects.push(ObjectSlot {
            op: Box::new(op),
            first_frame: true,
        });
        self.objects.len() - 1
    }

    /// Register a transform operation writing into `target`; returns its index.
    pub fn add_transform<T>(&mut self, op: T, target: H) -> usize
    where
        T: TransformExportOp<H> + 'static,
    {
        self.transforms.push(TransformSlot {
            op: Box::new(op),
            target,
        });
        self.transforms.len() - 1
    }

    #[inline]
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn num_transforms(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.transforms.is_empty()
    }

    /// Transform output targets in registration order.
    pub fn transform_targets(&self) -> impl Iterator<Item = &H> {
        self.transforms.iter().map(|t| &t.target)
    }

    /// Consume the registry, returning the transform output targets.
    pub fn into_transform_targets(self) -> Vec<H> {
        self.transforms.into_iter().map(|t| t.target).collect()
    }

    /// Reset per-session scheduling state.
    pub(crate) fn reset(&mut self) {
        for slot in &mut self.objects {
            slot.first_frame = true;
        }
    }
}

impl<H> Default for OperationRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FnObjectOp;

    fn constant_op() -> impl ObjectExportOp {
        FnObjectOp::new(
            |_t: Tick| Interval::FOREVER,
            |_time: &ExportTime| -> Result<()> { Ok(()) },
            || -> Result<()> { Ok(()) },
        )
    }

    #[test]
    fn test_registration_order() {
        let mut reg: OperationRegistry<&'static str> = OperationRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.add_object(constant_op()), 0);
        assert_eq!(reg.add_object(constant_op()), 1);
        let noop = |_: &ExportTime, _: &mut &'static str| -> Result<()> { Ok(()) };
        reg.add_transform(noop, "a");
        reg.add_transform(noop, "b");
        assert_eq!(reg.num_objects(), 2);
        assert_eq!(reg.num_transforms(), 2);
        assert_eq!(reg.transform_targets().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(reg.into_transform_targets(), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_interval_is_forever() {
        let mut reg: OperationRegistry = OperationRegistry::new();
        let id = reg.add_object(FnObjectOp::new(
            |_t: Tick| Interval::new(10, 2),
            |_time: &ExportTime| -> Result<()> { Ok(()) },
            || -> Result<()> { Ok(()) },
        ));
        assert_eq!(reg.objects[id].validity_interval(id, 0), Interval::FOREVER);
    }
}
