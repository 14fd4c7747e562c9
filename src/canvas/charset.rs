//! Code page 437 translation
//!
//! ANSI art is authored against the IBM PC character set. Bytes in the
//! control range map to the pictograph glyphs the PC ROM font draws for
//! them, and the upper half maps to box drawing, shading and Latin letters.

/// Glyphs for 0x00-0x1F
const CP437_LOW: [char; 32] = [
    '\u{0000}', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
];

/// Glyphs for 0x80-0xFF
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Translate a CP437 byte to its Unicode equivalent
pub fn cp437_to_char(byte: u8) -> char {
    match byte {
        0x00..=0x1F => CP437_LOW[usize::from(byte)],
        0x7F => '⌂',
        0x20..=0x7E => char::from(byte),
        0x80..=0xFF => CP437_HIGH[usize::from(byte - 0x80)],
    }
}

/// Translate a CP437 byte to a Unicode codepoint
pub fn cp437_to_utf32(byte: u8) -> u32 {
    u32::from(cp437_to_char(byte))
}
