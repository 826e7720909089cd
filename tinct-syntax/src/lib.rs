/*!
The object-model types consumed by the `tinct` color-space evaluator.

A PDF color-space descriptor is either a name or a heterogeneous array whose
shape depends on its first element, and its operands may be indirect
references into the enclosing document. This crate defines the owned
representation of those objects, plus the [`XRef`](xref::XRef) seam through
which references are resolved. It deliberately contains no file parsing:
callers adapt their own document model into these types.
*/

#![deny(missing_docs)]

pub mod object;
pub mod xref;

pub use object::dict::Dict;
pub use object::name::Name;
pub use object::stream::Stream;
pub use object::string::String;
pub use object::{Array, Number, ObjRef, Object};
pub use xref::{FetchError, XRef};
