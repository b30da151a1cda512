//! Color values for `fade` and `outsidefog`.

use std::num::ParseIntError;

use mapinfo_types::Argb;
use winnow::ascii::space1;
use winnow::combinator::{alt, opt, preceded};
use winnow::token::take_while;
use winnow::{ModalResult, Parser};

#[derive(Debug, thiserror::Error)]
pub enum ColorParseError {
    #[error("bad color \"{0}\"")]
    Malformed(String),
}

/// Parse `#RRGGBB`, `RRGGBB`, `"RR GG BB"` or a color name into an opaque
/// color.
pub fn parse_color(s: &str) -> Result<Argb, ColorParseError> {
    let trimmed = s.trim();
    if let Some(color) = named_color(trimmed) {
        return Ok(color);
    }
    alt((packed_hex, spaced_hex))
        .parse(trimmed)
        .map_err(|_| ColorParseError::Malformed(s.to_string()))
}

fn packed_hex(input: &mut &str) -> ModalResult<Argb> {
    preceded(opt('#'), take_while(6, ('0'..='9', 'a'..='f', 'A'..='F')))
        .try_map(|hex: &str| -> Result<Argb, ParseIntError> {
            let v = u32::from_str_radix(hex, 16)?;
            Ok(Argb::opaque((v >> 16) as u8, (v >> 8) as u8, v as u8))
        })
        .parse_next(input)
}

fn spaced_hex(input: &mut &str) -> ModalResult<Argb> {
    (
        hex_component,
        preceded(space1, hex_component),
        preceded(space1, hex_component),
    )
        .map(|(r, g, b)| Argb::opaque(r, g, b))
        .parse_next(input)
}

fn hex_component(input: &mut &str) -> ModalResult<u8> {
    take_while(1..=2, ('0'..='9', 'a'..='f', 'A'..='F'))
        .try_map(|hex: &str| u8::from_str_radix(hex, 16))
        .parse_next(input)
}

fn named_color(name: &str) -> Option<Argb> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Argb::opaque(0x00, 0x00, 0x00),
        "white" => Argb::opaque(0xff, 0xff, 0xff),
        "red" => Argb::opaque(0xff, 0x00, 0x00),
        "green" => Argb::opaque(0x00, 0xff, 0x00),
        "blue" => Argb::opaque(0x00, 0x00, 0xff),
        "yellow" => Argb::opaque(0xff, 0xff, 0x00),
        "cyan" => Argb::opaque(0x00, 0xff, 0xff),
        "magenta" => Argb::opaque(0xff, 0x00, 0xff),
        "gray" | "grey" => Argb::opaque(0xbe, 0xbe, 0xbe),
        "brown" => Argb::opaque(0xa5, 0x2a, 0x2a),
        "orange" => Argb::opaque(0xff, 0xa5, 0x00),
        _ => return None,
    };
    Some(color)
}
