//! Runtime construction of operations from closures.
//!
//! Operations assembled at runtime cannot rely on the compiler to check that
//! every node kind is handled, so [`OperationBuilder::build`] checks instead.
//! A missing handler is reported as [`DomainError::UnhandledVariant`] and no
//! operation value exists that could be applied.

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::dispatch::Operation;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::NodeKind;

type SizeFn<T> = Box<dyn Fn(&str, u64) -> T>;
type CircleFn<T> = Box<dyn Fn(&str, f64) -> T>;
type RectangleFn<T> = Box<dyn Fn(&str, f64, f64) -> T>;
type AggregateFn<T> = Box<dyn Fn(&str, &[&T]) -> T>;

/// Collects one handler per node kind.
pub struct OperationBuilder<T> {
    name: String,
    size: Option<SizeFn<T>>,
    circle: Option<CircleFn<T>>,
    rectangle: Option<RectangleFn<T>>,
    aggregate: Option<AggregateFn<T>>,
}

impl<T> OperationBuilder<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            circle: None,
            rectangle: None,
            aggregate: None,
        }
    }

    pub fn on_size(mut self, handler: impl Fn(&str, u64) -> T + 'static) -> Self {
        self.size = Some(Box::new(handler));
        self
    }

    pub fn on_circle(mut self, handler: impl Fn(&str, f64) -> T + 'static) -> Self {
        self.circle = Some(Box::new(handler));
        self
    }

    pub fn on_rectangle(mut self, handler: impl Fn(&str, f64, f64) -> T + 'static) -> Self {
        self.rectangle = Some(Box::new(handler));
        self
    }

    pub fn on_aggregate(mut self, handler: impl Fn(&str, &[&T]) -> T + 'static) -> Self {
        self.aggregate = Some(Box::new(handler));
        self
    }

    /// Kinds that do not have a handler yet.
    pub fn missing(&self) -> Vec<NodeKind> {
        NodeKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                NodeKind::Size => self.size.is_none(),
                NodeKind::Circle => self.circle.is_none(),
                NodeKind::Rectangle => self.rectangle.is_none(),
                NodeKind::Aggregate => self.aggregate.is_none(),
            })
            .collect()
    }

    /// Finishes the operation.
    ///
    /// Fails with [`DomainError::UnhandledVariant`] naming the first kind, in
    /// [`NodeKind::ALL`] order, that has no handler.
    #[instrument(level = "debug", skip(self), fields(op = %self.name))]
    pub fn build(self) -> DomainResult<FnOperation<T>> {
        let operation = FnOperation {
            size: self.size.ok_or(DomainError::UnhandledVariant(NodeKind::Size))?,
            circle: self
                .circle
                .ok_or(DomainError::UnhandledVariant(NodeKind::Circle))?,
            rectangle: self
                .rectangle
                .ok_or(DomainError::UnhandledVariant(NodeKind::Rectangle))?,
            aggregate: self
                .aggregate
                .ok_or(DomainError::UnhandledVariant(NodeKind::Aggregate))?,
            name: self.name,
        };
        debug!("operation complete");
        Ok(operation)
    }
}

impl<T> fmt::Debug for OperationBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationBuilder")
            .field("name", &self.name)
            .field("missing", &self.missing())
            .finish()
    }
}

/// Operation whose handlers are closures; only obtainable from
/// [`OperationBuilder::build`].
pub struct FnOperation<T> {
    name: String,
    size: SizeFn<T>,
    circle: CircleFn<T>,
    rectangle: RectangleFn<T>,
    aggregate: AggregateFn<T>,
}

impl<T> fmt::Debug for FnOperation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T> Operation for FnOperation<T> {
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self, label: &str, size: u64) -> T {
        (self.size)(label, size)
    }

    fn circle(&self, label: &str, radius: f64) -> T {
        (self.circle)(label, radius)
    }

    fn rectangle(&self, label: &str, width: f64, height: f64) -> T {
        (self.rectangle)(label, width, height)
    }

    fn aggregate(&self, label: &str, children: &[&T]) -> T {
        (self.aggregate)(label, children)
    }
}
