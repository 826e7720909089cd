//! The tint-transformation seam.
//!
//! Separation and DeviceN spaces map their components onto an alternate
//! space through a PDF function. Function evaluation lives outside this
//! crate; the parser only needs a factory that turns the function object
//! from the descriptor array into an opaque callable.

use crate::error::Result;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tinct_syntax::Object;

/// An evaluated tint transformation.
///
/// Maps `n` tint components in `[0, 1]` onto the components of the
/// alternate space. Evaluation must not retain the slices it is handed.
#[derive(Clone)]
pub struct TintFunction(Arc<dyn Fn(&[f32], &mut [f32]) + Send + Sync>);

impl TintFunction {
    /// Create a tint transformation from a closure.
    pub fn new(f: impl Fn(&[f32], &mut [f32]) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate the transformation, writing one component per slot of
    /// `dest`.
    #[inline]
    pub fn eval(&self, src: &[f32], dest: &mut [f32]) {
        (self.0)(src, dest)
    }
}

impl Debug for TintFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TintFunction {{..}}")
    }
}

/// A factory for tint transformations, implemented by the function layer.
///
/// The object handed to [`create`](Self::create) is the fourth operand of a
/// Separation or DeviceN descriptor array, unresolved; the factory resolves
/// references through its own document access.
pub trait TintFunctionFactory {
    /// Build the tint transformation described by a function object.
    fn create(&self, obj: &Object) -> Result<TintFunction>;
}
