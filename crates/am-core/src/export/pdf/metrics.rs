//! Glyph advance widths of the standard fonts
//!
//! Widths are in thousandths of the font size, taken from the Adobe AFM
//! files of the base-14 fonts. The tables cover printable ASCII; Latin-1
//! letters measure as their base letter.

use super::layout::Font;

const FIRST: u32 = 0x20;

/// Width of anything not covered below; never narrower than a real glyph
const FALLBACK: u16 = 1000;

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

/// Advance of `ch` in thousandths of the font size
pub fn advance(font: Font, ch: char) -> u16 {
    let table = match font {
        Font::TimesRoman => &TIMES_ROMAN,
        Font::TimesBold => &TIMES_BOLD,
        Font::TimesItalic => &TIMES_ITALIC,
        Font::Courier => {
            return if ch.is_control() && ch != '\t' { 0 } else { 600 };
        }
    };
    let ascii = |c: char| table[(c as u32 - FIRST) as usize];

    match ch {
        '\t' => ascii(' '),
        c if c.is_control() => 0,
        ' '..='~' => ascii(ch),
        '\u{a0}' => ascii(' '),
        _ => match base_letter(ch) {
            Some(base) => ascii(base),
            None => special(font, ch),
        },
    }
}

/// Accented Latin-1 letters share the advance of their base letter
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        '×' | '÷' => '+',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'Þ' => 'P',
        'ß' => 'b',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ð' | 'ò'..='ö' | 'ø' => 'o',
        'ñ' => 'n',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'þ' => 'p',
        _ => return None,
    };
    Some(base)
}

fn special(font: Font, ch: char) -> u16 {
    let italic = font == Font::TimesItalic;
    match ch {
        'Æ' => if font == Font::TimesBold { 1000 } else { 889 },
        'æ' => if font == Font::TimesBold { 722 } else { 667 },
        '‘' | '’' => 333,
        '“' | '”' => match font {
            Font::TimesBold => 500,
            Font::TimesItalic => 556,
            _ => 444,
        },
        '–' | '€' => 500,
        '—' | '…' => if italic { 889 } else { 1000 },
        '•' => 350,
        '™' => if font == Font::TimesBold { 1000 } else { 980 },
        _ => FALLBACK,
    }
}
