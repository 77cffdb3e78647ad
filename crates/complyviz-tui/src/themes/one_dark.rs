//! One Dark theme (Atom)

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34),
        bg1: Color::Rgb(0x31, 0x35, 0x3f),
        bg2: Color::Rgb(0x3e, 0x44, 0x51),
        fg0: Color::Rgb(0xab, 0xb2, 0xbf),
        fg1: Color::Rgb(0xc8, 0xcc, 0xd4),
        grey0: Color::Rgb(0x5c, 0x63, 0x70),
        grey1: Color::Rgb(0x7f, 0x84, 0x8e),
        red: Color::Rgb(0xe0, 0x6c, 0x75),
        orange: Color::Rgb(0xd1, 0x9a, 0x66),
        yellow: Color::Rgb(0xe5, 0xc0, 0x7b),
        green: Color::Rgb(0x98, 0xc3, 0x79),
        aqua: Color::Rgb(0x56, 0xb6, 0xc2),
        blue: Color::Rgb(0x61, 0xaf, 0xef),
        purple: Color::Rgb(0xc6, 0x78, 0xdd),
        compliant: Color::Rgb(0x98, 0xc3, 0x79),
        partial: Color::Rgb(0xe5, 0xc0, 0x7b),
        at_risk: Color::Rgb(0xe0, 0x6c, 0x75),
        track: Color::Rgb(0x3e, 0x44, 0x51),
        accent: Color::Rgb(0x61, 0xaf, 0xef),
    }
}
