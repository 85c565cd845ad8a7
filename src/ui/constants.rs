use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(0x25, 0x23, 0x21); // #252321
pub const FOREGROUND: Color = Color::Rgb(0xd3, 0xc6, 0xaa); // #d3c6aa
pub const PRIMARY: Color = Color::Rgb(0x66, 0xbb, 0x00); // #66bb00
pub const RED: Color = Color::Rgb(0xef, 0x44, 0x44); // #ef4444
pub const YELLOW: Color = Color::Rgb(0xc6, 0xab, 0x73); // #c6ab73
pub const BLUE: Color = Color::Rgb(0x72, 0xa9, 0xa2); // #72a9a2
pub const MAGENTA: Color = Color::Rgb(0xc1, 0x8a, 0xa5); // #c18aa5
pub const CYAN: Color = Color::Rgb(0x76, 0xad, 0x84); // #76ad84
pub const MUTED: Color = Color::Rgb(0x5e, 0x68, 0x60); // #5e6860

pub const DEFAULT_STYLE: Style = Style {
    fg: Some(FOREGROUND),
    bg: Some(BACKGROUND),
    underline_color: None,
    add_modifier: Modifier::empty(),
    sub_modifier: Modifier::empty(),
};

pub const SELECTED_STYLE: Style = Style {
    fg: Some(Color::Black),
    bg: Some(PRIMARY),
    underline_color: None,
    add_modifier: Modifier::BOLD,
    sub_modifier: Modifier::empty(),
};

pub const HEADER_STYLE: Style = Style {
    fg: Some(PRIMARY),
    bg: Some(BACKGROUND),
    underline_color: None,
    add_modifier: Modifier::BOLD,
    sub_modifier: Modifier::empty(),
};

pub const ALTERNATING_ROW_COLOR: Color = Color::Rgb(0x2d, 0x2b, 0x29);
pub const PENDING_COLOR: Color = MUTED;

pub const ASCII_LOGO: &str = r"
 _ _       _
| (_)_ __ | | ___ __ ___
| | | '_ \| |/ / '__/ __|
| | | | | |   <| |  \__ \
|_|_|_| |_|_|\_\_|  |___/
";
