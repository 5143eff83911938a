//! Runtime-tunable search parameters, separate from the fixed constants in
//! [`super::constants`]. These are the knobs `setoption` can reach; the
//! constants module holds values nobody needs to change at runtime.

pub const DEFAULT_TT_MB: usize = 64;
pub const DEFAULT_PAWN_HASH_KB: usize = 1024;
pub const MAX_THREADS: usize = 8;

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    pub num_threads: usize,
    pub tt_size_mb: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            num_threads: 1,
            tt_size_mb: DEFAULT_TT_MB,
        }
    }
}
