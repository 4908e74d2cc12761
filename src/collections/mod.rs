//! Collection Types.

pub mod fnv;
pub mod hash_table;

/// Collections Prelude
pub mod prelude {
    #[doc(no_inline)]
    pub use super::fnv::FnvBuildHasher;
    #[doc(no_inline)]
    pub use super::hash_table::{
        DEFAULT_CAPACITY, DEFAULT_KEY_LABEL, HashTable, MAX_LOAD_FACTOR, Report, TableStats,
    };
}
