//! ANT serial protocol framing and typed messages for USB radio dongles.
//!
//! # Crate Structure
//!
//! - [`frame`]: sync/length/id/checksum framing, extended data, stream reader and writer
//! - [`message`]: typed message codecs, outbound commands and the codec registry
//!
//! The `cli` feature builds the `antwire` binary for decoding and composing
//! frames from the command line.

/// Re-export frame types.
pub mod frame {
    pub use antwire_frame::*;
}

/// Re-export message types.
pub mod message {
    pub use antwire_message::*;
}
