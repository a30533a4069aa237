use embedded_can::{ExtendedId, Id};
use heapless::Vec;

use crate::MAX_DATA_LENGTH;

/// A raw frame as exchanged with the bus transport: a 29-bit arbitration
/// identifier, up to 8 payload bytes, and a receive (or send) timestamp.
///
/// Every frame produced or consumed by this codec is a standard extended
/// data frame. Remote, error, and FD frames are never modeled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    id: ExtendedId,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    data: Vec<u8, MAX_DATA_LENGTH>,
    timestamp: f64,
}

/// Errors which can arise while constructing a frame from raw upstream
/// values. These indicate a malformed frame from the transport, not an
/// addressing-scheme issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    #[error("Received an arbitration ID ({0:?}) that was out of the valid extended range (0..=0x1FFFFFFF)")]
    IdOutOfRange(u32),
    #[error("Received a payload with a length ({0:?}) that was out of the valid range (0..=8)")]
    PayloadTooLong(usize),
}

impl RawFrame {
    /// Creates a frame from a raw identifier and payload. Fails if the
    /// identifier does not fit in 29 bits or the payload exceeds 8 bytes.
    pub fn new(raw_id: u32, data: &[u8], timestamp: f64) -> Result<Self, FrameError> {
        let id = ExtendedId::new(raw_id).ok_or(FrameError::IdOutOfRange(raw_id))?;

        if data.len() > MAX_DATA_LENGTH {
            return Err(FrameError::PayloadTooLong(data.len()));
        }

        Ok(Self {
            id,
            data: Vec::from_slice(data).unwrap(),
            timestamp,
        })
    }

    pub(crate) fn from_parts(id: ExtendedId, data: Vec<u8, MAX_DATA_LENGTH>, timestamp: f64) -> Self {
        Self {
            id,
            data,
            timestamp,
        }
    }

    /// Gets the arbitration identifier of the frame
    pub fn id(&self) -> ExtendedId {
        self.id
    }

    /// Gets the payload of the frame
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Gets the DLC (Data Length Code) of the frame
    pub fn dlc(&self) -> usize {
        self.data.len()
    }

    /// Gets the timestamp assigned by the bus transport (0.0 for frames
    /// built locally for transmission)
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Consumes self and returns a new self with the supplied timestamp
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_remote_frame(&self) -> bool {
        false
    }

    pub fn is_error_frame(&self) -> bool {
        false
    }

    pub fn is_fd(&self) -> bool {
        false
    }
}

impl embedded_can::Frame for RawFrame {
    /// Creates a new data frame. `id` must be an extended ID and `data` must
    /// have a length in the range 0..=8 or else `None` will be returned.
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let Id::Extended(id) = id.into() else {
            return None;
        };

        if data.len() > MAX_DATA_LENGTH {
            return None;
        }

        Some(Self::from_parts(id, Vec::from_slice(data).unwrap(), 0.0))
    }

    /// Remote frames are never modeled by this codec, so this always
    /// returns `None`.
    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        true
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::Extended(self.id)
    }

    fn dlc(&self) -> usize {
        self.data.len()
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use embedded_can::{Frame, StandardId};

    use super::*;

    #[test]
    fn construction_checks_upstream_values() {
        assert_eq!(
            RawFrame::new(0x2000_0000, &[], 0.0),
            Err(FrameError::IdOutOfRange(0x2000_0000))
        );

        assert_eq!(
            RawFrame::new(0x123, &[0u8; 9], 0.0),
            Err(FrameError::PayloadTooLong(9))
        );

        let frame = RawFrame::new(0x1FFF_FFFF, &[0u8; 8], 1.5).unwrap();
        assert_eq!(frame.id().as_raw(), 0x1FFF_FFFF);
        assert_eq!(frame.dlc(), 8);
        assert_eq!(frame.timestamp(), 1.5);
    }

    #[test]
    fn frames_are_always_standard_extended_data_frames() {
        let frame = RawFrame::new(0x0804_B543, &[0x01], 0.0).unwrap();

        assert!(Frame::is_extended(&frame));
        assert!(!frame.is_remote_frame());
        assert!(!frame.is_error_frame());
        assert!(!frame.is_fd());
    }

    #[test]
    fn frame_trait_rejects_standard_ids_and_remote_frames() {
        assert_eq!(
            <RawFrame as Frame>::new(StandardId::ZERO, &[0x00]),
            None
        );

        assert_eq!(
            <RawFrame as Frame>::new_remote(ExtendedId::ZERO, 4),
            None
        );

        let frame = <RawFrame as Frame>::new(ExtendedId::MAX, &[0x00, 0x11]).unwrap();
        assert_eq!(frame.timestamp(), 0.0);
        assert_eq!(frame.data(), &[0x00, 0x11]);
    }

    #[test]
    fn with_timestamp_stamps_a_transmit_frame() {
        let frame = RawFrame::new(0x123, &[], 0.0).unwrap().with_timestamp(42.25);
        assert_eq!(frame.timestamp(), 42.25);
    }
}
