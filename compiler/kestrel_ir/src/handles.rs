//! Handles to values owned by collaborators outside the node model.
//!
//! The structural type system, the lexical-scope resolver and the
//! operation registry each keep their own tables; nodes only store
//! opaque indices into them.

use std::fmt;

macro_rules! external_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

external_handle!(
    /// Resolved type from the structural type system.
    ///
    /// `TypeId::UNRESOLVED` is the initial value of every type slot.
    TypeId
);

external_handle!(
    /// Resolved closure: which outer variables a function body captures, and how.
    ClosureId
);

external_handle!(
    /// Resolved lexical context of a document.
    ContextId
);

external_handle!(
    /// Concrete binary operation bound by the operation registry.
    OperationId
);

impl TypeId {
    /// Type slot not yet filled by the type system.
    pub const UNRESOLVED: TypeId = TypeId(u32::MAX);

    #[inline]
    pub const fn is_resolved(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_default_is_unresolved() {
        assert_eq!(TypeId::default(), TypeId::UNRESOLVED);
        assert!(!TypeId::UNRESOLVED.is_resolved());
        assert!(TypeId::new(0).is_resolved());
    }

    #[test]
    fn test_handle_debug() {
        assert_eq!(format!("{:?}", ClosureId::new(4)), "ClosureId(4)");
        assert_eq!(format!("{:?}", OperationId::new(1)), "OperationId(1)");
    }
}
