use thiserror::Error;

/// Returned by the slot-allocating operations of a [`Signal`](crate::Signal)
/// (`connect`, `once`, `forward_to` and their free-function counterparts).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    #[error("all {capacity} connection slots are occupied")]
    CapacityExhausted { capacity: usize },
}
