//! Word labels for 1-based positions.
//!
//! Speaker definitions are named `Speaker<Label>`, and TeX control sequences
//! may only contain letters, so positions are spelled out in British English
//! number words, each capitalised and joined without separators:
//! `1 -> One`, `21 -> TwentyOne`, `101 -> OneHundredAndOne`.
//!
//! Distinct numbers always produce distinct labels.

const SCALES: [(u32, &str); 3] = [
    (1_000_000_000, "Billion"),
    (1_000_000, "Million"),
    (1_000, "Thousand"),
];

/// Spell out `position` as a capitalised word label.
///
/// Covers the whole `u32` range; `0` maps to `Zero`.
pub fn ordinal_label(position: u32) -> String {
    if position == 0 {
        return String::from("Zero");
    }

    let mut label = String::new();
    let mut rest = position;

    for (scale, name) in SCALES {
        let count = rest.checked_div(scale).unwrap_or_default();
        if count > 0 {
            push_below_thousand(&mut label, count);
            label.push_str(name);
            rest = rest.checked_rem(scale).unwrap_or_default();
        }
    }

    if rest > 0 {
        if position >= 1000 && rest < 100 {
            label.push_str("And");
        }
        push_below_thousand(&mut label, rest);
    }

    label
}

/// Append the words for `1..=999`.
fn push_below_thousand(out: &mut String, n: u32) {
    let hundreds = n.checked_div(100).unwrap_or_default();
    let rest = n.checked_rem(100).unwrap_or_default();

    if hundreds > 0 {
        out.push_str(small_word(hundreds));
        out.push_str("Hundred");
        if rest > 0 {
            out.push_str("And");
        }
    }

    if rest > 0 {
        push_below_hundred(out, rest);
    }
}

/// Append the words for `1..=99`.
fn push_below_hundred(out: &mut String, n: u32) {
    if n < 20 {
        out.push_str(small_word(n));
        return;
    }

    out.push_str(tens_word(n.checked_div(10).unwrap_or_default()));
    let units = n.checked_rem(10).unwrap_or_default();
    if units > 0 {
        out.push_str(small_word(units));
    }
}

const fn small_word(n: u32) -> &'static str {
    match n {
        1 => "One",
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Eleven",
        12 => "Twelve",
        13 => "Thirteen",
        14 => "Fourteen",
        15 => "Fifteen",
        16 => "Sixteen",
        17 => "Seventeen",
        18 => "Eighteen",
        19 => "Nineteen",
        _ => "",
    }
}

const fn tens_word(n: u32) -> &'static str {
    match n {
        2 => "Twenty",
        3 => "Thirty",
        4 => "Forty",
        5 => "Fifty",
        6 => "Sixty",
        7 => "Seventy",
        8 => "Eighty",
        9 => "Ninety",
        _ => "",
    }
}
