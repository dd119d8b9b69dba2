//! Identifier formatting for export
//!
//! Renders a 128-bit identifier into the textual shapes the presentation
//! shell puts on the clipboard. Pure and total: every style is defined for
//! every identifier.

use serde::{Deserialize, Serialize};

use crate::core::records::Guid;

/// Output style for identifier export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidStyle {
    /// `{12345678-9ABC-DEF0-1122-334455667788}`
    Braced,
    /// `123456789ABCDEF01122334455667788` — 32 hex characters, no
    /// separators, big-endian field order matching the braced form
    RawHex,
    /// `<object id="obj" classid="clsid:…">NO OBJECT</object>`
    EmbedMarkup,
    /// `{ 0x12345678, 0x9ABC, 0xDEF0, { 0x11, …, 0x88, } };`
    SourceLiteral,
}

impl GuidStyle {
    /// Parse style from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "braced" | "string" => Some(GuidStyle::Braced),
            "hex" | "raw-hex" | "raw_hex" => Some(GuidStyle::RawHex),
            "object" | "embed" | "embed-markup" => Some(GuidStyle::EmbedMarkup),
            "struct" | "source" | "source-literal" => Some(GuidStyle::SourceLiteral),
            _ => None,
        }
    }
}

/// Uppercase hyphenated form without braces, as used in node labels
pub fn hyphenated_upper(guid: Guid) -> String {
    let (d1, d2, d3, d4) = guid.as_fields();
    format!(
        "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
        d1, d2, d3, d4[0], d4[1], d4[2], d4[3], d4[4], d4[5], d4[6], d4[7]
    )
}

/// Braced uppercase form, as used in descriptions
pub fn braced(guid: Guid) -> String {
    format!("{{{}}}", hyphenated_upper(guid))
}

/// Render an identifier in the requested style
pub fn format_guid(guid: Guid, style: GuidStyle) -> String {
    match style {
        GuidStyle::Braced => braced(guid),
        GuidStyle::RawHex => guid.as_bytes().iter().map(|b| format!("{:02X}", b)).collect(),
        GuidStyle::EmbedMarkup => format!(
            "<object id=\"obj\" classid=\"clsid:{}\">NO OBJECT</object>",
            guid
        ),
        GuidStyle::SourceLiteral => {
            let (d1, d2, d3, d4) = guid.as_fields();
            let mut out = format!("{{ 0x{:08X}, 0x{:04X}, 0x{:04X}, {{ ", d1, d2, d3);
            for byte in d4 {
                out.push_str(&format!("0x{:02X}, ", byte));
            }
            out.push_str("} };");
            out
        }
    }
}
