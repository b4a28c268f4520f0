//! Letter vocabulary, normalization and per-letter capabilities.

/// The 22 regular Hebrew letters.
pub const HEBREW_LETTERS: [char; 22] = [
    'א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט', 'י', 'כ',
    'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ', 'ק', 'ר', 'ש', 'ת',
];

/// Punctuation kept as-is by [`normalize`].
pub const PUNCTUATION: [char; 12] = [' ', '!', '"', '\'', '(', ')', ',', '-', '.', ':', ';', '?'];

/// Placeholder tokens produced by [`normalize`].
pub const SPECIAL_TOKENS: [char; 4] = ['H', 'O', '5', '1'];

/// Fallback token for characters outside the vocabulary.
pub const UNKNOWN_TOKEN: char = 'O';

/// Token for the Yiddish ligatures.
pub const LIGATURE_TOKEN: char = 'H';

/// Number of entries of [`VOCAB`].
pub const VOCAB_SIZE: usize = PUNCTUATION.len() + HEBREW_LETTERS.len() + SPECIAL_TOKENS.len();

/// Every character [`normalize`] can return, indexed by vocabulary id.
pub const VOCAB: [char; VOCAB_SIZE] = {
    let mut vocab = [' '; VOCAB_SIZE];
    let mut i = 0;
    while i < PUNCTUATION.len() {
        vocab[i] = PUNCTUATION[i];
        i += 1;
    }
    let mut j = 0;
    while j < HEBREW_LETTERS.len() {
        vocab[i + j] = HEBREW_LETTERS[j];
        j += 1;
    }
    let mut k = 0;
    while k < SPECIAL_TOKENS.len() {
        vocab[i + j + k] = SPECIAL_TOKENS[k];
        k += 1;
    }
    vocab
};

/// Checks if `c` lies in the Hebrew letter block, final forms included.
#[inline(always)]
pub const fn is_hebrew_letter(c: char) -> bool {
    matches!(c, '\u{05D0}'..='\u{05EA}')
}

/// Gets the regular form of a final letter.
#[inline(always)]
pub const fn final_to_regular(c: char) -> Option<char> {
    match c {
        'ך' => Some('כ'),
        'ם' => Some('מ'),
        'ן' => Some('נ'),
        'ף' => Some('פ'),
        'ץ' => Some('צ'),
        _ => None,
    }
}

/// Gets the vocabulary id of an already normalized character.
pub fn vocab_id(c: char) -> Option<usize> {
    VOCAB.iter().position(|&v| v == c)
}

#[inline(always)]
fn in_vocab(c: char) -> bool {
    PUNCTUATION.contains(&c) || SPECIAL_TOKENS.contains(&c) || HEBREW_LETTERS.contains(&c)
}

/// Maps any character onto [`VOCAB`].
///
/// The function is total and idempotent. Only the ASCII digits are folded
/// into the two digit tokens; other numeric characters (`½`, `²`, Arabic-Indic
/// digits) become the unknown token.
pub fn normalize(c: char) -> char {
    if in_vocab(c) {
        return c;
    }
    if let Some(regular) = final_to_regular(c) {
        return regular;
    }
    match c {
        '\n' | '\t' => ' ',
        '־' | '‒' | '–' | '—' | '―' | '−' | '+' => '-',
        '[' => '(',
        ']' => ')',
        '´' | '‘' | '’' => '\'',
        '“' | '”' | '״' => '"',
        '…' => ',',
        'ײ' | 'װ' | 'ױ' => LIGATURE_TOKEN,
        '0' | '2'..='9' => '5',
        _ => UNKNOWN_TOKEN,
    }
}

/// Checks if the raw letter may carry a dagesh dot.
#[inline(always)]
pub const fn can_dagesh(c: char) -> bool {
    matches!(
        c,
        'ב' | 'ג' | 'ד' | 'ה' | 'ו' | 'ז' | 'ט' | 'י' | 'כ' | 'ל' | 'מ' | 'נ' | 'ס' | 'פ'
            | 'צ' | 'ק' | 'ש' | 'ת' | 'ך' | 'ף'
    )
}

/// Checks if the raw letter may carry a shin or sin dot.
#[inline(always)]
pub const fn can_sin(c: char) -> bool {
    c == 'ש'
}

/// Checks if the raw letter may carry a vowel point.
#[inline(always)]
pub const fn can_nikud(c: char) -> bool {
    matches!(
        c,
        'א' | 'ב' | 'ג' | 'ד' | 'ה' | 'ו' | 'ז' | 'ח' | 'ט' | 'י' | 'כ' | 'ל' | 'מ' | 'נ'
            | 'ס' | 'ע' | 'פ' | 'צ' | 'ק' | 'ר' | 'ש' | 'ת' | 'ך' | 'ן'
    )
}
