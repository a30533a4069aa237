use core::fmt::{self, Write};

use embedded_can::ExtendedId;
use heapless::String;

use crate::{Message, RawFrame, MAX_DATA_LENGTH};

/// Number of cells in a tabular log row.
pub const LOG_COLUMN_COUNT: usize = 8;

/// One rendered cell of a tabular log row.
pub type LogCell = String<32>;

// A value that cannot fit (an extreme timestamp, e.g. 1.0e40 expands to 40+
// decimal digits) is truncated at the cell capacity rather than panicking.
fn cell(args: fmt::Arguments<'_>) -> LogCell {
    let mut out = LogCell::new();
    let _ = out.write_fmt(args);
    out
}

/// Renders payload bytes as uppercase hex, two digits per byte, with no
/// separators and no prefix (`[0x00, 0x11]` becomes `"0011"`).
pub fn payload_to_hex(data: &[u8]) -> String<{ 2 * MAX_DATA_LENGTH }> {
    let mut out = String::new();

    for byte in data {
        write!(out, "{byte:02X}").expect("Failed to push to String");
    }

    out
}

/// Renders an arbitration identifier as lowercase `0x`-prefixed hex with no
/// zero padding (`0x0804B543` becomes `"0x804b543"`).
pub fn id_to_hex(id: ExtendedId) -> String<10> {
    let mut out = String::new();
    write!(out, "0x{:x}", id.as_raw()).expect("Failed to push to String");
    out
}

/// Renders a received frame and its decoded message as one row of an
/// append-only tabular log.
///
/// Column order is fixed: timestamp, arbitration ID, device type name,
/// manufacturer name, API class, API index, device ID, payload hex.
pub fn log_row(frame: &RawFrame, message: &Message) -> [LogCell; LOG_COLUMN_COUNT] {
    [
        cell(format_args!("{}", frame.timestamp())),
        cell(format_args!("{}", id_to_hex(frame.id()))),
        cell(format_args!("{}", message.device_type.name())),
        cell(format_args!("{}", message.manufacturer.name())),
        cell(format_args!("{}", message.api_class)),
        cell(format_args!("{}", message.api_index)),
        cell(format_args!("{}", message.device_id)),
        cell(format_args!("{}", payload_to_hex(&message.data))),
    ]
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FRC Message: {}-{} [ID {}] ApiClass:{} ApiIndex:{} Data:0x",
            self.manufacturer.name(),
            self.device_type.name(),
            self.device_id,
            self.api_class,
            self.api_index,
        )?;

        for byte in self.data.iter() {
            write!(f, "{byte:02X}")?;
        }

        Ok(())
    }
}
