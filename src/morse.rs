//! Morse codec: character <-> dot/dash mapping.
//!
//! Lenient in both directions: anything outside the table passes through
//! unchanged instead of failing, so free-form scenario text always encodes.

// --- Symbols -----------------------------------------------------------------

/// One Morse pulse. Notes on the track and player taps are both expressed in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }
}

// --- Code table ----------------------------------------------------------------

/// International Morse for letters, digits and the punctuation used in radio
/// traffic. Codes are unique so `decode` is the exact inverse of `encode`.
pub const MORSE_TABLE: &[(char, &str)] = &[
    ('A', ".-"), ('B', "-..."), ('C', "-.-."), ('D', "-.."), ('E', "."), ('F', "..-."),
    ('G', "--."), ('H', "...."), ('I', ".."), ('J', ".---"), ('K', "-.-"), ('L', ".-.."),
    ('M', "--"), ('N', "-."), ('O', "---"), ('P', ".--."), ('Q', "--.-"), ('R', ".-."),
    ('S', "..."), ('T', "-"), ('U', "..-"), ('V', "...-"), ('W', ".--"), ('X', "-..-"),
    ('Y', "-.--"), ('Z', "--.."),
    ('0', "-----"), ('1', ".----"), ('2', "..---"), ('3', "...--"), ('4', "....-"),
    ('5', "....."), ('6', "-...."), ('7', "--..."), ('8', "---.."), ('9', "----."),
    ('.', ".-.-.-"), (',', "--..--"), ('?', "..--.."), ('/', "-..-."), ('-', "-....-"),
    ('(', "-.--."), (')', "-.--.-"),
];

fn code_for(c: char) -> Option<&'static str> {
    let upper = c.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .find(|(ch, _)| *ch == upper)
        .map(|(_, code)| *code)
}

fn char_for(code: &str) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(ch, _)| *ch)
}

// --- Encode / decode -------------------------------------------------------------

/// Encode text into space-separated codes. A space in the input becomes its own
/// (single space) token, so word gaps show up as three consecutive spaces.
pub fn encode(text: &str) -> String {
    let mut tokens: Vec<String> = Vec::with_capacity(text.len());
    for c in text.chars() {
        if c == ' ' {
            tokens.push(" ".to_string());
        } else if let Some(code) = code_for(c) {
            tokens.push(code.to_string());
        } else {
            tokens.push(c.to_string());
        }
    }
    tokens.join(" ")
}

/// Decode space-separated codes. Empty tokens (from consecutive spaces) become a
/// space; unknown codes are copied through as-is.
pub fn decode(morse: &str) -> String {
    morse
        .split(' ')
        .map(|token| {
            if token.is_empty() {
                " ".to_string()
            } else if let Some(c) = char_for(token) {
                c.to_string()
            } else {
                token.to_string()
            }
        })
        .collect()
}

/// Dot/dash-only rendition of `text`: what the player is expected to tap.
pub fn canonical(text: &str) -> String {
    encode(text)
        .chars()
        .filter(|c| Symbol::from_char(*c).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_codes_unique() {
        let mut seen = HashSet::new();
        for (c, code) in MORSE_TABLE {
            assert!(seen.insert(*code), "duplicate code '{}' for '{}'", code, c);
        }
    }

    #[test]
    fn test_round_trip_every_table_char() {
        for (c, _) in MORSE_TABLE {
            let s = c.to_string();
            assert_eq!(decode(&encode(&s)), s);
        }
    }

    #[test]
    fn test_encode_case_insensitive_and_spacing() {
        assert_eq!(encode("sos"), "... --- ...");
        assert_eq!(encode("SOS"), encode("sos"));
        // letter, space token, letter
        assert_eq!(encode("E T"), ".   -");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(encode("A!"), ".- !");
        assert_eq!(decode(".- ......."), "A.......");
    }

    #[test]
    fn test_decode_word_gap() {
        assert_eq!(decode("-.-. --.-  -.. ."), "CQ DE");
        // encode emits the space as its own token, which decodes to two gaps
        assert_eq!(decode(&encode("CQ DE")), "CQ  DE");
    }

    #[test]
    fn test_canonical_strips_separators() {
        assert_eq!(canonical("CQ"), "-.-.--.-");
        assert_eq!(canonical("E T"), ".-");
        assert_eq!(canonical(""), "");
    }

    #[test]
    fn test_symbol_chars() {
        assert_eq!(Symbol::from_char('.'), Some(Symbol::Dot));
        assert_eq!(Symbol::from_char('-'), Some(Symbol::Dash));
        assert_eq!(Symbol::from_char(' '), None);
        assert_eq!(Symbol::Dash.as_char(), '-');
    }
}
