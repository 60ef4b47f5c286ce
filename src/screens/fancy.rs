//! Novelty clock renderings: binary, BCD, bar graph, alternate radixes,
//! Roman numerals, Morse, a word clock, and chemical elements.

use core::fmt::Write as _;

use heapless::String;

use super::{Context, Page};

/// HD44780 full-block character, used for bar graphs.
const BLOCK: u8 = 0xFF;

pub(super) fn binary(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    page.center(0, "binary");
    let mut w = page.writer(1, 0);
    let _ = write!(w, "h   {:05b}", t.hour());
    let mut w = page.writer(2, 0);
    let _ = write!(w, "m  {:06b}", t.minute());
    let mut w = page.writer(3, 0);
    let _ = write!(w, "s  {:06b}", t.second());
    page
}

fn bcd_digits(value: u8) -> (u8, u8) {
    (value / 10, value % 10)
}

pub(super) fn binary_hor_bcd(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    page.center(0, "BCD");
    for (row, (label, value)) in [("h", t.hour()), ("m", t.minute()), ("s", t.second())]
        .into_iter()
        .enumerate()
    {
        let (tens, ones) = bcd_digits(value);
        let mut w = page.writer(row + 1, 0);
        let _ = write!(w, "{label}  {tens:04b} {ones:04b}");
    }
    page
}

pub(super) fn binary_vert_bcd(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let digits = {
        let (h1, h2) = bcd_digits(t.hour());
        let (m1, m2) = bcd_digits(t.minute());
        let (s1, s2) = bcd_digits(t.second());
        [h1, h2, m1, m2, s1, s2]
    };

    let mut page = Page::new();
    // One row per bit weight, one column pair per digit.
    for (row, weight) in [8u8, 4, 2, 1].into_iter().enumerate() {
        let mut w = page.writer(row, 0);
        let _ = write!(w, "{weight}  ");
        for (i, digit) in digits.into_iter().enumerate() {
            let col = 3 + i * 2 + (i / 2);
            let bit = if digit & weight != 0 { b'1' } else { b'0' };
            page.set(row, col, bit);
        }
    }
    page
}

pub(super) fn bar(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    for (row, (label, value, scale)) in [
        ("h", u16::from(t.hour()), 24u16),
        ("m", u16::from(t.minute()), 60),
        ("s", u16::from(t.second()), 60),
    ]
    .into_iter()
    .enumerate()
    {
        let row = row + 1;
        page.write_at(row, 0, label);
        let filled = (value * 18 / scale) as usize;
        for col in 0..filled {
            page.set(row, 2 + col, BLOCK);
        }
    }
    let mut w = page.writer(0, 0);
    let _ = write!(
        w,
        "bar {:02}:{:02}:{:02}",
        t.hour(),
        t.minute(),
        t.second()
    );
    page
}

pub(super) fn hex(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    page.center(0, "hexadecimal");
    let mut text: String<20> = String::new();
    let _ = write!(
        text,
        "{:02X}:{:02X}:{:02X}",
        t.hour(),
        t.minute(),
        t.second()
    );
    page.center(2, text.as_str());
    page
}

pub(super) fn octal(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    page.center(0, "octal");
    let mut text: String<20> = String::new();
    let _ = write!(
        text,
        "{:02o}:{:02o}:{:02o}",
        t.hour(),
        t.minute(),
        t.second()
    );
    page.center(2, text.as_str());
    page
}

pub(super) fn hex_octal(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    let mut w = page.writer(0, 0);
    let _ = write!(
        w,
        "hex {:02X}:{:02X}:{:02X}",
        t.hour(),
        t.minute(),
        t.second()
    );
    let mut w = page.writer(1, 0);
    let _ = write!(
        w,
        "oct {:02o}:{:02o}:{:02o}",
        t.hour(),
        t.minute(),
        t.second()
    );
    let mut w = page.writer(3, 0);
    let _ = write!(
        w,
        "dec {:02}:{:02}:{:02}",
        t.hour(),
        t.minute(),
        t.second()
    );
    page
}

/// Roman numeral for 0..=59 ("-" for zero, which Rome never wrote).
pub(super) fn to_roman(value: u8) -> String<12> {
    const STEPS: [(u8, &str); 7] = [
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    if value == 0 {
        let _ = out.push('-');
        return out;
    }
    let mut rest = value;
    for (step, numeral) in STEPS {
        while rest >= step {
            let _ = out.push_str(numeral);
            rest -= step;
        }
    }
    out
}

pub(super) fn roman(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    page.center(0, "Roman");
    page.center(1, to_roman(t.hour()).as_str());
    page.center(2, to_roman(t.minute()).as_str());
    page.center(3, to_roman(t.second()).as_str());
    page
}

/// International Morse for a decimal digit.
pub(super) fn morse_digit(digit: u8) -> &'static str {
    match digit {
        0 => "-----",
        1 => ".----",
        2 => "..---",
        3 => "...--",
        4 => "....-",
        5 => ".....",
        6 => "-....",
        7 => "--...",
        8 => "---..",
        _ => "----.",
    }
}

pub(super) fn morse(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    page.center(0, "Morse");
    for (row, (label, value)) in [("h", t.hour()), ("m", t.minute()), ("s", t.second())]
        .into_iter()
        .enumerate()
    {
        let (tens, ones) = bcd_digits(value);
        let mut w = page.writer(row + 1, 0);
        let _ = write!(w, "{label}  {} {}", morse_digit(tens), morse_digit(ones));
    }
    page
}

const HOUR_WORDS: [&str; 12] = [
    "twelve", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven",
];

pub(super) fn word_clock(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    // Round to the nearest five minutes.
    let raw = (u16::from(t.minute()) + 2) / 5;
    let five = raw % 12;
    let to_next_hour = raw >= 7;
    let hour_index = usize::from(t.hour() % 12) + usize::from(to_next_hour);
    let hour_word = HOUR_WORDS[hour_index % 12];

    let mut page = Page::new();
    page.center(0, "it is");
    if five == 0 {
        page.center(1, hour_word);
        page.center(2, "o'clock");
        return page;
    }

    let minute_phrase = match five.min(12 - five) {
        1 => "five",
        2 => "ten",
        3 => "quarter",
        4 => "twenty",
        5 => "twentyfive",
        _ => "half",
    };
    page.center(1, minute_phrase);
    page.center(2, if to_next_hour { "to" } else { "past" });
    page.center(3, hour_word);
    page
}

/// Symbol and name for atomic numbers 1..=59, enough for any minute.
const ELEMENTS: [(&str, &str); 59] = [
    ("H", "hydrogen"),
    ("He", "helium"),
    ("Li", "lithium"),
    ("Be", "beryllium"),
    ("B", "boron"),
    ("C", "carbon"),
    ("N", "nitrogen"),
    ("O", "oxygen"),
    ("F", "fluorine"),
    ("Ne", "neon"),
    ("Na", "sodium"),
    ("Mg", "magnesium"),
    ("Al", "aluminium"),
    ("Si", "silicon"),
    ("P", "phosphorus"),
    ("S", "sulfur"),
    ("Cl", "chlorine"),
    ("Ar", "argon"),
    ("K", "potassium"),
    ("Ca", "calcium"),
    ("Sc", "scandium"),
    ("Ti", "titanium"),
    ("V", "vanadium"),
    ("Cr", "chromium"),
    ("Mn", "manganese"),
    ("Fe", "iron"),
    ("Co", "cobalt"),
    ("Ni", "nickel"),
    ("Cu", "copper"),
    ("Zn", "zinc"),
    ("Ga", "gallium"),
    ("Ge", "germanium"),
    ("As", "arsenic"),
    ("Se", "selenium"),
    ("Br", "bromine"),
    ("Kr", "krypton"),
    ("Rb", "rubidium"),
    ("Sr", "strontium"),
    ("Y", "yttrium"),
    ("Zr", "zirconium"),
    ("Nb", "niobium"),
    ("Mo", "molybdenum"),
    ("Tc", "technetium"),
    ("Ru", "ruthenium"),
    ("Rh", "rhodium"),
    ("Pd", "palladium"),
    ("Ag", "silver"),
    ("Cd", "cadmium"),
    ("In", "indium"),
    ("Sn", "tin"),
    ("Sb", "antimony"),
    ("Te", "tellurium"),
    ("I", "iodine"),
    ("Xe", "xenon"),
    ("Cs", "caesium"),
    ("Ba", "barium"),
    ("La", "lanthanum"),
    ("Ce", "cerium"),
    ("Pr", "praseodymium"),
];

fn element_row(page: &mut Page, row: usize, label: &str, value: u8) {
    let mut w = page.writer(row, 0);
    match value {
        0 => {
            let _ = write!(w, "{label}  0 --");
        }
        _ => {
            let (symbol, name) = ELEMENTS[usize::from(value) - 1];
            let _ = write!(w, "{label} {value:2} {symbol:<2} {name}");
        }
    }
}

pub(super) fn chemical(ctx: &Context<'_>) -> Page {
    let t = ctx.local.time();
    let mut page = Page::new();
    page.center(0, "elements");
    element_row(&mut page, 1, "h", t.hour());
    element_row(&mut page, 2, "m", t.minute());
    element_row(&mut page, 3, "s", t.second());
    page
}
