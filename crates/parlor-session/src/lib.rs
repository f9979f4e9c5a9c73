//! Per-connection player identity for Parlor.
//!
//! The [`PlayerRegistry`] is the server's record of who is behind each
//! live connection: a display name and, if they've joined one, the room
//! they're in. It deliberately knows nothing about rooms beyond the id —
//! room membership itself lives in `parlor-room`.
//!
//! Every operation here is total: registering twice, forgetting an unknown
//! connection, or renaming a connection that never set a name are all
//! well-defined. The registry never errors, so it has no error type.

mod registry;

pub use registry::{PlayerConnection, PlayerRegistry, DEFAULT_NAME};
