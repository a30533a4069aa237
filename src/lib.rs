#![no_std]

//! Codec for the FRC CAN bus addressing convention, which sub-divides the
//! extended (29-bit) arbitration identifier into five fields:
//!
//! ```text
//!      |Device Type|Manufacturer|API Class|API Index|Device ID|
//! Bits  28       24 23        16 15     10 9       6 5       0
//! ```
//!
//! An incoming identifier of `0x0804B543` therefore decodes as device type 8
//! (power distribution module), manufacturer 4 (CTRE), API class 45, API
//! index 5, device ID 3.

mod frame;
mod id;
mod message;
mod render;

/// Maximum payload length of a CAN 2.0 data frame.
pub const MAX_DATA_LENGTH: usize = 8;

pub use frame::*;
pub use id::*;
pub use message::*;
pub use render::*;

pub use embedded_can::{ExtendedId, Frame, Id};
