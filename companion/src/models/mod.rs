mod conversation;
mod filters;
mod preferences;
mod snapshot;

pub use conversation::*;
pub use filters::*;
pub use preferences::*;
pub use snapshot::*;
