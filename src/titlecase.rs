use crate::roman;

/// Words that keep a fixed rendering regardless of position. Both
/// sides of each pair have the same length.
const EXCEPTION_WORDS: &[(&str, &str)] = &[
    ("ACCA", "ACCA"),
    ("AM", "AM"),
    ("BBC", "BBC"),
    ("BMW", "BMW"),
    ("BP", "BP"),
    ("CP", "CP"),
    ("DIY", "DIY"),
    ("GB", "GB"),
    ("GMBH", "GmbH"),
    ("LLP", "LLP"),
    ("MP", "MP"),
    ("NHS", "NHS"),
    ("PC", "PC"),
    ("PCT", "PCT"),
    ("PLC", "plc"),
    ("PM", "PM"),
    ("RAF", "RAF"),
    ("RC", "RC"),
    ("TSB", "TSB"),
    ("TV", "TV"),
    ("UK", "UK"),
    ("YMCA", "YMCA"),
];

/// Words forced to lowercase when enclosed by hyphens, as in
/// "Stratford-upon-Avon".
const LOWERCASE_WHEN_HYPHENATED: &[&str] = &[
    "AND", "AT", "BUT", "BY", "CUM", "FOR", "IN", "LE", "OF", "ON", "OR", "PLC", "SO", "THE",
    "TO", "UP", "Y", "YET",
];

/// Converts uppercase text into title case using address conventions:
/// "MCDONALD" becomes "McDonald" and "UK" stays as it is. The input is
/// assumed to be uppercase already; mixed-case input may come out
/// wrong, but never fails.
pub fn to_title_case(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut converted: Vec<char> = Vec::with_capacity(chars.len());
    let mut uppercase_next = true;
    let mut start = 0;

    for i in 0..chars.len() {
        converted.push(if uppercase_next {
            chars[i].to_ascii_uppercase()
        } else {
            chars[i].to_ascii_lowercase()
        });
        uppercase_next = next_should_be_uppercase(&chars, &mut converted, i, &mut start);
    }

    check_exception_word(&chars, &mut converted, start, chars.len());
    ensure_starts_with_capital(&mut converted);
    converted.into_iter().collect()
}

fn next_should_be_uppercase(
    chars: &[char],
    converted: &mut [char],
    index: usize,
    start: &mut usize,
) -> bool {
    match chars[index] {
        // an uppercase M right before means a word just started (McDonald)
        'C' => index != 0 && converted[index - 1] == 'M',
        '-' => {
            check_hyphenated_word(chars, converted, *start, index);
            *start = index + 1;
            true
        }
        '(' | ')' | ' ' => {
            check_exception_word(chars, converted, *start, index);
            *start = index + 1;
            true
        }
        // neither starts a new word
        '&' | '.' => true,
        // "ONE'S" stays possessive, "ONE'TWO" starts a new word
        '\'' => !is_end_of_word(chars, index + 2),
        _ => false,
    }
}

fn is_end_of_word(chars: &[char], index: usize) -> bool {
    match chars.get(index) {
        None => index == chars.len(),
        Some(&c) => c == ' ' || c == '-' || c == ')',
    }
}

fn check_exception_word(chars: &[char], converted: &mut [char], start: usize, end: usize) {
    let word: String = chars[start..end].iter().collect();
    if let Ok(found) = EXCEPTION_WORDS.binary_search_by_key(&word.as_str(), |&(from, _)| from) {
        for (offset, c) in EXCEPTION_WORDS[found].1.chars().enumerate() {
            converted[start + offset] = c;
        }
    } else if roman::is_numeral(&chars[start..end]) {
        for c in &mut converted[start..end] {
            *c = c.to_ascii_uppercase();
        }
    }
}

fn check_hyphenated_word(chars: &[char], converted: &mut [char], start: usize, end: usize) {
    // the rule only fires for a word with a hyphen on both sides
    if start != 0 && chars[start - 1] == '-' {
        let word: String = chars[start..end].iter().collect();
        if LOWERCASE_WHEN_HYPHENATED.binary_search(&word.as_str()).is_ok() {
            converted[start] = converted[start].to_ascii_lowercase();
            return;
        }
    }

    check_exception_word(chars, converted, start, end);
}

fn ensure_starts_with_capital(converted: &mut [char]) {
    if converted.len() > 1 {
        if converted[0] == '(' {
            converted[1] = converted[1].to_ascii_uppercase();
        } else {
            converted[0] = converted[0].to_ascii_uppercase();
        }
    }
}
