//! vr-protocol: the line-oriented ASCII command protocol of the rig.
//!
//! Provides:
//! - framing: `\r`-terminated lines in, `\r`-terminated replies out
//! - `Command`/`Args`: whitespace tokenising with forgiving integer arguments
//! - `ProtocolAdapter`: the command table mapping tokens to handlers
//! - `Session`: a reader/writer loop that ticks the rig between commands
//!
//! Nothing a peer sends produces an error value: out-of-range numbers,
//! rejected operations and unknown commands all become text replies.
//!
//! # Example
//!
//! ```
//! use vr_protocol::ProtocolAdapter;
//! use vr_rig::RigController;
//!
//! let mut rig = RigController::seeded().unwrap();
//! let adapter = ProtocolAdapter::new();
//! assert_eq!(adapter.handle_line(&mut rig, "GNA").as_deref(), Some("GNA,15"));
//! assert_eq!(adapter.handle_line(&mut rig, "BCS 0").as_deref(), Some("BCS,00,Too Low"));
//! ```

pub mod adapter;
pub mod command;
pub mod format;
pub mod framing;
pub mod handlers;
pub mod session;

pub use adapter::{Handler, ProtocolAdapter, UNRECOGNISED};
pub use command::{Args, Command};
pub use framing::{FrameDecoder, TERMINATOR, encode_reply, split_frames};
pub use session::{Session, TickSource};
