//! Kestrel IR - Typed Node Model
//!
//! This crate holds the typed intermediate representation the Kestrel
//! front-end lowers every source file into:
//! - Spans, interned names and opaque handles to the type system, scope
//!   resolver and operation registry
//! - The node catalog (directives, expressions, match arms) in a flat arena
//! - Structural traversal (`children`, the visitor, pre-order search)
//! - Closure specialization and overload grouping
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: children are `NodeId(u32)` indices, never boxes
//! - **One Owner**: each node has at most one structural parent; the parent
//!   column is derived and never owns
//! - **Intern Everything**: identifiers and operators are `Name(u32)`
//! - **Fail Loudly**: structural misuse is an [`IrError`], source problems
//!   are [`ParseError`] and [`SemanticError`] values
//!
//! Literal floats are stored as u64 bits so node payloads stay `Eq + Hash`.

use std::sync::Once;

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod children;
mod closure;
mod document;
mod dump;
mod error;
mod handles;
mod interner;
mod lowering;
mod name;
pub mod node;
mod node_id;
mod overload;
mod query;
mod span;
mod stack;
mod text;
pub mod visitor;

pub use arena::{Ancestors, NodeArena};
pub use children::{kind_children, Children};
pub use closure::{base_function, function_parts, specialize, FunctionParts};
pub use document::Document;
pub use dump::dump_tree;
pub use error::{IrError, ParseError, SemanticError};
pub use handles::{ClosureId, ContextId, OperationId, TypeId};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use lowering::Lowering;
pub use name::Name;
pub use node::{LiteralKind, LiteralValue, NodeFlags, NodeKind, NodeTag};
pub use node_id::{LocalSlot, NodeId, NodeRange};
pub use overload::{fun_directive_name, group_overloads, overload_group};
pub use query::{descendants, search, search_by, PreOrder};
pub use span::{Span, SpanError};
pub use stack::ensure_sufficient_stack;
pub use text::text;
pub use visitor::{walk_node, Visitor};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
