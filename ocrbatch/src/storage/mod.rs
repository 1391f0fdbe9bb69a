//! File access used by the pipeline.
//!
//! Reading inputs, writing results and checking literal input paths go through
//! the [`FileStore`] trait so tests can substitute their own store. Glob
//! expansion in the resolver walks the filesystem directly.

mod local;
mod traits;

pub use local::LocalFileStore;
pub use traits::FileStore;
