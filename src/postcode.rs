/// Options for formatting and validating postcodes. The default
/// uppercases letters and skips characters outside `[A-Za-z0-9]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PostcodeOptions {
    pub change_case: bool,
    pub skip_invalid_characters: bool,
    /// Also reject letters Royal Mail never issues in each position.
    pub strict: bool,
}

impl Default for PostcodeOptions {
    fn default() -> Self {
        PostcodeOptions {
            change_case: true,
            skip_invalid_characters: true,
            strict: false,
        }
    }
}

// AA11 1AA
const MAX_LENGTH: usize = 8;

/// Normalizes a postcode: at most 7 significant characters, one space
/// inserted 3 from the end. The output is not checked for validity.
pub fn format_postcode(text: &str, options: PostcodeOptions) -> String {
    let mut formatted: Vec<char> = Vec::with_capacity(MAX_LENGTH);
    for c in text.trim_matches(|c: char| c.is_ascii() && is_whitespace(c as u8)).chars() {
        // one short of the maximum because the space is inserted later
        if formatted.len() == MAX_LENGTH - 1 {
            break;
        }

        if options.skip_invalid_characters && !c.is_ascii_alphanumeric() {
            continue;
        }
        let c = if options.change_case {
            c.to_ascii_uppercase()
        } else {
            c
        };
        if !(c.is_ascii() && is_whitespace(c as u8)) {
            formatted.push(c);
        }
    }

    if formatted.len() > 3 {
        formatted.insert(formatted.len() - 3, ' ');
    }
    formatted.into_iter().collect()
}

/// Checks that the text has the structure of a postcode. This cannot
/// tell whether the postcode is actually in use.
pub fn is_valid_postcode(text: &str, options: PostcodeOptions) -> bool {
    let bytes = text.as_bytes();
    let validator = Validator::new(options);

    let end = skip_trailing_whitespace(bytes);
    let Some(inward) = validator.check_inward(bytes, end) else {
        return false;
    };
    let Some(outward) = validator.check_outward(bytes, inward) else {
        return false;
    };

    // anything left over before the outward code makes the whole text
    // invalid, even with skipping enabled
    outward == skip_leading_whitespace(bytes)
}

enum Rules {
    Basic,
    Strict,
}

struct Validator {
    skip_invalid: bool,
    rules: Rules,
}

impl Validator {
    fn new(options: PostcodeOptions) -> Self {
        Validator {
            skip_invalid: options.skip_invalid_characters,
            rules: if options.strict {
                Rules::Strict
            } else {
                Rules::Basic
            },
        }
    }

    /// Returns the index of the start of the inward code, scanning
    /// backwards from `end` (exclusive). The inward code reads
    /// letter, letter, digit backwards.
    fn check_inward(&self, bytes: &[u8], end: usize) -> Option<usize> {
        let mut scan = ReverseScan::new(bytes, self.skip_invalid, end);
        if !self.is_inward_letter(scan.next()?) {
            return None;
        }
        if !self.is_inward_letter(scan.next()?) {
            return None;
        }
        if !scan.next()?.is_ascii_digit() {
            return None;
        }
        Some(scan.index())
    }

    fn is_inward_letter(&self, c: u8) -> bool {
        if !c.is_ascii_alphabetic() {
            return false;
        }
        match self.rules {
            Rules::Basic => true,
            Rules::Strict => !matches!(c.to_ascii_uppercase(), b'C' | b'I' | b'K' | b'M' | b'V'),
        }
    }

    /// Returns the index of the start of the outward code, scanning
    /// backwards from `end` (exclusive). Forward shapes: A9, A9A, A99,
    /// AA9, AA9A, AA99.
    fn check_outward(&self, bytes: &[u8], end: usize) -> Option<usize> {
        let mut scan = ReverseScan::new(bytes, self.skip_invalid, end);
        let mut letters = OutwardLetters::default();

        // the outward code ends in 1A, 11 or 1
        let last = scan.next()?;
        if last.is_ascii_alphabetic() {
            if !scan.next()?.is_ascii_digit() {
                return None;
            }
            letters.push(last);
        } else if last.is_ascii_digit() {
            let mut ahead = scan;
            if ahead.next().is_some_and(|c| c.is_ascii_digit()) {
                scan = ahead;
            }
        } else {
            return None;
        }

        // one or two leading letters
        let first = scan.next()?;
        if !first.is_ascii_alphabetic() {
            return None;
        }
        letters.push(first);
        let mut start = scan.index();

        let mut ahead = scan;
        if let Some(c) = ahead.next() {
            if c.is_ascii_alphabetic() {
                letters.push(c);
                start = ahead.index();
            }
        }

        match self.rules {
            Rules::Basic => Some(start),
            Rules::Strict => letters.all_valid().then_some(start),
        }
    }
}

/// Walks a byte slice backwards, always skipping whitespace and,
/// optionally, anything that could never appear in a postcode.
#[derive(Copy, Clone)]
struct ReverseScan<'a> {
    bytes: &'a [u8],
    skip_invalid: bool,
    index: usize,
}

impl<'a> ReverseScan<'a> {
    fn new(bytes: &'a [u8], skip_invalid: bool, end: usize) -> Self {
        ReverseScan {
            bytes,
            skip_invalid,
            index: end,
        }
    }

    /// The index of the character most recently returned by `next`.
    fn index(&self) -> usize {
        self.index
    }

    fn next(&mut self) -> Option<u8> {
        while self.index > 0 {
            self.index -= 1;
            let c = self.bytes[self.index];
            if is_whitespace(c) || (self.skip_invalid && !c.is_ascii_alphanumeric()) {
                continue;
            }
            return Some(c);
        }

        None
    }
}

/// Outward-code letters in reverse scan order; the letter pushed last
/// is the first character of the postcode.
#[derive(Default)]
struct OutwardLetters {
    buf: [u8; 3],
    len: usize,
}

impl OutwardLetters {
    fn push(&mut self, c: u8) {
        self.buf[self.len] = c;
        self.len += 1;
    }

    fn all_valid(&self) -> bool {
        let mut letters = self.buf[..self.len]
            .iter()
            .rev()
            .map(|c| c.to_ascii_uppercase());

        if !letters.next().is_some_and(is_valid_first_letter) {
            return false;
        }
        if let Some(c) = letters.next() {
            if !is_valid_second_letter(c) {
                return false;
            }
        }
        if let Some(c) = letters.next() {
            if !is_valid_third_letter(c) {
                return false;
            }
        }
        true
    }
}

fn is_valid_first_letter(c: u8) -> bool {
    !matches!(c, b'Q' | b'V' | b'X')
}

fn is_valid_second_letter(c: u8) -> bool {
    !matches!(c, b'I' | b'Z')
}

fn is_valid_third_letter(c: u8) -> bool {
    matches!(c, b'A'..=b'H' | b'J' | b'K' | b'P' | b'S'..=b'X')
}

// the ASCII whitespace range 0x09-0x0D plus space
fn is_whitespace(c: u8) -> bool {
    matches!(c, b'\t'..=b'\r' | b' ')
}

fn skip_leading_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|&c| !is_whitespace(c))
        .unwrap_or(bytes.len())
}

/// One past the last non-whitespace character.
fn skip_trailing_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .rposition(|&c| !is_whitespace(c))
        .map_or(0, |i| i + 1)
}
