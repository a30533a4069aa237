use embedded_can::ExtendedId;
use heapless::Vec;
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::{
    id::{pack_field, unpack_field},
    FrameError, RawFrame, API_CLASS_MASK, API_CLASS_SHIFT, API_INDEX_MASK, API_INDEX_SHIFT,
    DEVICE_ID_MASK, DEVICE_ID_SHIFT, DEVICE_TYPE_MASK, DEVICE_TYPE_SHIFT, MANUFACTURER_MASK,
    MANUFACTURER_SHIFT, MAX_DATA_LENGTH,
};

/// The kind of device addressed by a frame (5-bit field).
///
/// Conversion from an integer never fails: every raw code without a named
/// variant, including 13..=30, collapses to [`DeviceType::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceType {
    Broadcast = 0,
    RobotCtrl = 1,
    MotorCtrl = 2,
    RelayCtrl = 3,
    Gyro = 4,
    Accelerometer = 5,
    Ultrasonic = 6,
    GearTooth = 7,
    PwrDistModule = 8,
    PneumaticsCtrl = 9,
    Misc = 10,
    IoBreakout = 11,
    FwUpdate = 31,
    #[num_enum(default)]
    Reserved = 12,
}

/// The manufacturer of the addressed device (8-bit field). Unmapped raw
/// codes collapse to [`Manufacturer::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Manufacturer {
    Broadcast = 0,
    Ni = 1,
    LuminaryMicro = 2,
    Deka = 3,
    Ctre = 4,
    Rev = 5,
    Grapple = 6,
    Mindsensors = 7,
    TeamUse = 8,
    KauaiLabs = 9,
    Copperforge = 10,
    PlayingWithFusion = 11,
    Studica = 12,
    ThriftyBot = 13,
    ReduxRobotics = 14,
    #[num_enum(default)]
    Reserved = 15,
}

/// Meaning of the API index field in broadcast messages. Unmapped raw codes
/// collapse to [`BroadcastApiIndex::Reserved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BroadcastApiIndex {
    Disable = 0,
    SystemHalt = 1,
    SystemReset = 2,
    DeviceAssign = 3,
    DeviceQuery = 4,
    Heartbeat = 5,
    Sync = 6,
    Update = 7,
    FwVer = 8,
    Enumerate = 9,
    SystemResume = 10,
    #[num_enum(default)]
    Reserved = 11,
}

impl DeviceType {
    /// Canonical protocol name, as rendered in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Broadcast => "BROADCAST",
            Self::RobotCtrl => "ROBOT_CTRL",
            Self::MotorCtrl => "MOTOR_CTRL",
            Self::RelayCtrl => "RELAY_CTRL",
            Self::Gyro => "GYRO",
            Self::Accelerometer => "ACCELEROMETER",
            Self::Ultrasonic => "ULTRASONIC",
            Self::GearTooth => "GEAR_TOOTH",
            Self::PwrDistModule => "PWR_DIST_MODULE",
            Self::PneumaticsCtrl => "PNEUMATICS_CTRL",
            Self::Misc => "MISC",
            Self::IoBreakout => "IO_BREAKOUT",
            Self::FwUpdate => "FW_UPDATE",
            Self::Reserved => "RESERVED",
        }
    }
}

impl Manufacturer {
    /// Canonical protocol name, as rendered in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Broadcast => "BROADCAST",
            Self::Ni => "NI",
            Self::LuminaryMicro => "LUMINARY_MICRO",
            Self::Deka => "DEKA",
            Self::Ctre => "CTRE",
            Self::Rev => "REV",
            Self::Grapple => "GRAPPLE",
            Self::Mindsensors => "MINDSENSORS",
            Self::TeamUse => "TEAM_USE",
            Self::KauaiLabs => "KAUAI_LABS",
            Self::Copperforge => "COPPERFORGE",
            Self::PlayingWithFusion => "PLAYING_WITH_FUSION",
            Self::Studica => "STUDICA",
            Self::ThriftyBot => "THRIFTY_BOT",
            Self::ReduxRobotics => "REDUX_ROBOTICS",
            Self::Reserved => "RESERVED",
        }
    }
}

/// A decoded FRC CAN message: the five arbitration ID sub-fields plus the
/// payload bytes.
///
/// A `Message` is built either field-by-field for transmission or by
/// decoding a received [`RawFrame`] with [`Message::from_frame`]; both the
/// encode and decode directions return new values rather than mutating in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    pub device_type: DeviceType,
    pub manufacturer: Manufacturer,
    pub api_class: u8,
    pub api_index: u8,
    pub device_id: u8,
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub data: Vec<u8, MAX_DATA_LENGTH>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            device_type: DeviceType::Broadcast,
            manufacturer: Manufacturer::Broadcast,
            api_class: 0,
            api_index: 0,
            device_id: 0,
            data: Vec::new(),
        }
    }
}

impl Message {
    /// Creates a message from its five sub-fields and payload. Fails only
    /// if the payload exceeds 8 bytes.
    pub fn new(
        device_type: DeviceType,
        manufacturer: Manufacturer,
        api_class: u8,
        api_index: u8,
        device_id: u8,
        data: &[u8],
    ) -> Result<Self, FrameError> {
        if data.len() > MAX_DATA_LENGTH {
            return Err(FrameError::PayloadTooLong(data.len()));
        }

        Ok(Self {
            device_type,
            manufacturer,
            api_class,
            api_index,
            device_id,
            data: Vec::from_slice(data).unwrap(),
        })
    }

    /// Packs the five sub-fields into a 29-bit arbitration identifier.
    ///
    /// Each field is masked to its width, so an `api_class`, `api_index`, or
    /// `device_id` wider than its field is silently truncated to the
    /// low-order bits rather than rejected.
    pub fn arbitration_id(&self) -> ExtendedId {
        let raw = pack_field(
            u8::from(self.device_type) as u32,
            DEVICE_TYPE_SHIFT,
            DEVICE_TYPE_MASK,
        ) | pack_field(
            u8::from(self.manufacturer) as u32,
            MANUFACTURER_SHIFT,
            MANUFACTURER_MASK,
        ) | pack_field(self.api_class as u32, API_CLASS_SHIFT, API_CLASS_MASK)
            | pack_field(self.api_index as u32, API_INDEX_SHIFT, API_INDEX_MASK)
            | pack_field(self.device_id as u32, DEVICE_ID_SHIFT, DEVICE_ID_MASK);

        // The field masks only cover bits 0..29, so this cannot be out of
        // range for an extended ID.
        ExtendedId::new(raw).unwrap()
    }

    /// Encodes the message into a frame ready for transmission. The frame
    /// carries a zero timestamp until the transport stamps it (see
    /// [`RawFrame::with_timestamp`]).
    pub fn to_frame(&self) -> RawFrame {
        RawFrame::from_parts(self.arbitration_id(), self.data.clone(), 0.0)
    }

    /// Decodes a received frame. This never fails: raw device type and
    /// manufacturer codes without a defined mapping degrade to the
    /// `Reserved` member of their enumeration, and the remaining sub-fields
    /// are plain integers that always fit their bit width.
    pub fn from_frame(frame: &RawFrame) -> Self {
        let raw = frame.id().as_raw();

        Self {
            device_type: DeviceType::from(unpack_field(
                raw,
                DEVICE_TYPE_SHIFT,
                DEVICE_TYPE_MASK,
            ) as u8),
            manufacturer: Manufacturer::from(unpack_field(
                raw,
                MANUFACTURER_SHIFT,
                MANUFACTURER_MASK,
            ) as u8),
            api_class: unpack_field(raw, API_CLASS_SHIFT, API_CLASS_MASK) as u8,
            api_index: unpack_field(raw, API_INDEX_SHIFT, API_INDEX_MASK) as u8,
            device_id: unpack_field(raw, DEVICE_ID_SHIFT, DEVICE_ID_MASK) as u8,
            data: Vec::from_slice(frame.data()).unwrap(),
        }
    }

    /// Returns whether the message is broadcast-like on either axis: a
    /// broadcast device type *or* a broadcast manufacturer.
    pub fn is_broadcast(&self) -> bool {
        self.device_type == DeviceType::Broadcast || self.manufacturer == Manufacturer::Broadcast
    }

    /// Checks the message against the addressing scheme's semantic rules.
    ///
    /// A reserved device type or manufacturer is always invalid. A message
    /// that is broadcast-like on either axis must be a well-formed
    /// broadcast: broadcast on *both* axes, API class zero, and an API index
    /// with a defined broadcast meaning. Everything else is valid.
    pub fn is_valid(&self) -> bool {
        if self.device_type == DeviceType::Reserved {
            return false;
        }

        if self.manufacturer == Manufacturer::Reserved {
            return false;
        }

        if self.is_broadcast() {
            return self.device_type == DeviceType::Broadcast
                && self.manufacturer == Manufacturer::Broadcast
                && self.api_class == 0
                && BroadcastApiIndex::from(self.api_index) != BroadcastApiIndex::Reserved;
        }

        true
    }
}
