//! Morse-Encoder
//!
//! Wandelt Text in eine Folge von zeitgesteuerten An/Aus-Intervallen um.
//! Der Encoder ist zustandslos bezüglich der Hardware, die Wiedergabe
//! übernimmt `primitives::play_morse`.

use core::str::Chars;

use crate::types::MorseTiming;

/// Standard-Tabelle: A-Z, 0-9 und gängige Satzzeichen (ITU)
const STANDARD: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

/// Zuordnung Zeichen → Symbolfolge aus `.` (Punkt) und `-` (Strich)
#[derive(Debug, Clone, Copy)]
pub struct MorseTable {
    entries: &'static [(char, &'static str)],
}

impl MorseTable {
    /// Die eingebaute ITU-Tabelle
    pub const STANDARD: MorseTable = MorseTable { entries: STANDARD };

    /// Eigene Tabelle (z.B. reduzierter Zeichensatz)
    pub const fn new(entries: &'static [(char, &'static str)]) -> Self {
        Self { entries }
    }

    /// Sucht die Symbolfolge für ein Zeichen (Groß-/Kleinschreibung egal)
    pub fn lookup(&self, c: char) -> Option<&'static str> {
        let c = c.to_ascii_uppercase();
        self.entries
            .iter()
            .find(|(key, _)| *key == c)
            .map(|(_, code)| *code)
    }
}

impl Default for MorseTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Ausgangspegel eines Intervalls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    On,
    Off,
}

/// Ein Intervall der Morse-Ausgabe: Pegel für `ms` Millisekunden halten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub level: Level,
    pub ms: u32,
}

impl Element {
    pub const fn on(ms: u32) -> Self {
        Self { level: Level::On, ms }
    }

    pub const fn off(ms: u32) -> Self {
        Self { level: Level::Off, ms }
    }
}

/// Iterator über die Intervalle eines Textes
///
/// Regeln:
/// - Innerhalb eines Zeichens folgt auf jedes Symbol außer dem letzten
///   eine Pause von `element_gap_ms`.
/// - Nach jedem kodierten Zeichen folgt `letter_gap_ms`, sobald noch ein
///   Zeichen oder Leerzeichen kommt.
/// - Ein Leerzeichen ergibt zusätzlich `word_gap_ms`.
/// - Zeichen ohne Tabelleneintrag werden ohne Pause übersprungen.
pub struct MorseEncoder<'a> {
    chars: Chars<'a>,
    table: MorseTable,
    timing: MorseTiming,
    symbols: Option<Chars<'static>>,
    queued: Option<Element>,
    letter_pending: bool,
}

impl<'a> MorseEncoder<'a> {
    pub fn new(text: &'a str, timing: MorseTiming) -> Self {
        Self::with_table(text, timing, MorseTable::STANDARD)
    }

    pub fn with_table(text: &'a str, timing: MorseTiming, table: MorseTable) -> Self {
        Self {
            chars: text.chars(),
            table,
            timing,
            symbols: None,
            queued: None,
            letter_pending: false,
        }
    }

    /// Gesamtdauer der Ausgabe in Millisekunden
    pub fn duration_ms(self) -> u32 {
        self.fold(0u32, |acc, e| acc.saturating_add(e.ms))
    }

    fn symbol_ms(&self, symbol: char) -> u32 {
        if symbol == '-' {
            self.timing.dash_ms
        } else {
            self.timing.dot_ms
        }
    }
}

impl Iterator for MorseEncoder<'_> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        loop {
            if let Some(element) = self.queued.take() {
                return Some(element);
            }

            if let Some(symbols) = self.symbols.as_mut() {
                if let Some(symbol) = symbols.next() {
                    let last = symbols.as_str().is_empty();
                    let on = Element::on(self.symbol_ms(symbol));
                    if last {
                        self.symbols = None;
                        self.letter_pending = true;
                    } else {
                        self.queued = Some(Element::off(self.timing.element_gap_ms));
                    }
                    return Some(on);
                }
                self.symbols = None;
                continue;
            }

            let c = self.chars.next()?;
            if c == ' ' {
                let word_gap = Element::off(self.timing.word_gap_ms);
                if core::mem::take(&mut self.letter_pending) {
                    self.queued = Some(word_gap);
                    return Some(Element::off(self.timing.letter_gap_ms));
                }
                return Some(word_gap);
            }

            let Some(code) = self.table.lookup(c) else {
                continue;
            };
            self.symbols = Some(code.chars());

            if core::mem::take(&mut self.letter_pending) {
                return Some(Element::off(self.timing.letter_gap_ms));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> MorseTiming {
        MorseTiming {
            dot_ms: 1,
            dash_ms: 3,
            element_gap_ms: 1,
            letter_gap_ms: 3,
            word_gap_ms: 7,
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(MorseTable::STANDARD.lookup('s'), Some("..."));
        assert_eq!(MorseTable::STANDARD.lookup('S'), Some("..."));
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(MorseTable::STANDARD.lookup('!'), None);
        assert_eq!(MorseTable::STANDARD.lookup('ä'), None);
    }

    #[test]
    fn test_single_letter_has_no_trailing_gap() {
        let elements: heapless::Vec<Element, 8> = MorseEncoder::new("A", timing()).collect();
        assert_eq!(
            elements.as_slice(),
            &[Element::on(1), Element::off(1), Element::on(3)]
        );
    }

    #[test]
    fn test_word_gap_follows_letter_gap() {
        let elements: heapless::Vec<Element, 8> = MorseEncoder::new("E E", timing()).collect();
        assert_eq!(
            elements.as_slice(),
            &[Element::on(1), Element::off(3), Element::off(7), Element::on(1)]
        );
    }

    #[test]
    fn test_duration() {
        // "SOS": 9 Symbole (3+9+3), 6 Elementpausen, 2 Buchstabenpausen
        assert_eq!(MorseEncoder::new("SOS", timing()).duration_ms(), 15 + 6 + 6);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(MorseEncoder::new("", timing()).count(), 0);
    }
}
