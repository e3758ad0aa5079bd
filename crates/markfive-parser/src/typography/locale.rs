/// Punctuation conventions of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub tag: &'static str,
    /// Opening and closing double quotes.
    pub double: [&'static str; 2],
    pub single: [&'static str; 2],
    /// Replacements for `<<` and `>>`.
    pub guillemets: [&'static str; 2],
    /// Replacements for a lone `<` and `>`.
    pub single_guillemets: [&'static str; 2],
    /// Guillemets take a no-break space on their inner side, and `?`, `!`
    /// and `:` get a narrow no-break space before them.
    pub spaced: bool,
}

const FORWARD: [&str; 2] = ["«", "»"];
const FORWARD_SINGLE: [&str; 2] = ["‹", "›"];
const REVERSED: [&str; 2] = ["»", "«"];
const REVERSED_SINGLE: [&str; 2] = ["›", "‹"];

const fn locale(
    tag: &'static str,
    double: [&'static str; 2],
    single: [&'static str; 2],
) -> Locale {
    Locale {
        tag,
        double,
        single,
        guillemets: FORWARD,
        single_guillemets: FORWARD_SINGLE,
        spaced: false,
    }
}

const fn reversed(mut locale: Locale) -> Locale {
    locale.guillemets = REVERSED;
    locale.single_guillemets = REVERSED_SINGLE;
    locale
}

const fn spaced(mut locale: Locale) -> Locale {
    locale.spaced = true;
    locale
}

static LOCALES: &[Locale] = &[
    locale("en", ["“", "”"], ["‘", "’"]),
    reversed(locale("de", ["„", "“"], ["‚", "‘"])),
    locale("de-CH", ["«", "»"], ["‹", "›"]),
    spaced(locale("fr", ["«", "»"], ["“", "”"])),
    locale("fr-CH", ["«", "»"], ["‹", "›"]),
    locale("it", ["«", "»"], ["“", "”"]),
    locale("es", ["«", "»"], ["“", "”"]),
    locale("pt", ["«", "»"], ["“", "”"]),
    locale("ru", ["«", "»"], ["„", "“"]),
    locale("uk", ["«", "»"], ["„", "“"]),
    locale("be", ["«", "»"], ["„", "“"]),
    locale("pl", ["„", "”"], ["«", "»"]),
    locale("cs", ["„", "“"], ["‚", "‘"]),
    locale("sk", ["„", "“"], ["‚", "‘"]),
    locale("nl", ["“", "”"], ["‘", "’"]),
    locale("sv", ["”", "”"], ["’", "’"]),
    locale("fi", ["”", "”"], ["’", "’"]),
    reversed(locale("da", ["»", "«"], ["›", "‹"])),
    locale("nb", ["«", "»"], ["‘", "’"]),
    locale("ja", ["「", "」"], ["『", "』"]),
    locale("zh", ["「", "」"], ["『", "』"]),
];

impl Locale {
    /// Look up a language tag: exact match first (case-insensitive, `_`
    /// accepted for `-`), then the primary subtag, then English.
    pub fn resolve(tag: &str) -> &'static Locale {
        let tag = tag.trim().replace('_', "-");
        let find = |wanted: &str| {
            LOCALES
                .iter()
                .find(|locale| locale.tag.eq_ignore_ascii_case(wanted))
        };
        find(tag.as_str())
            .or_else(|| tag.split('-').next().and_then(find))
            .unwrap_or(&LOCALES[0])
    }

    /// `glyph` with the no-break space spaced locales put inside guillemets.
    pub fn pad(&self, glyph: &str, opening: bool) -> String {
        let is_guillemet = matches!(glyph, "«" | "»" | "‹" | "›");
        match (self.spaced && is_guillemet, opening) {
            (true, true) => format!("{glyph}\u{a0}"),
            (true, false) => format!("\u{a0}{glyph}"),
            (false, _) => glyph.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_fallback_lookup() {
        assert_eq!(Locale::resolve("de").double, ["„", "“"]);
        assert_eq!(Locale::resolve("de-CH").double, ["«", "»"]);
        assert_eq!(Locale::resolve("de_ch").tag, "de-CH");
        assert_eq!(Locale::resolve("de-AT").tag, "de");
        assert_eq!(Locale::resolve("tlh").tag, "en");
        assert_eq!(Locale::resolve("").tag, "en");
    }

    #[test]
    fn swiss_french_is_not_spaced() {
        assert!(Locale::resolve("fr").spaced);
        assert!(!Locale::resolve("fr-CH").spaced);
        assert_eq!(Locale::resolve("fr").pad("«", true), "«\u{a0}");
        assert_eq!(Locale::resolve("fr").pad("“", true), "“");
        assert_eq!(Locale::resolve("fr-CH").pad("»", false), "»");
    }

    #[test]
    fn reversed_guillemets() {
        assert_eq!(Locale::resolve("de").guillemets, ["»", "«"]);
        assert_eq!(Locale::resolve("da").single_guillemets, ["›", "‹"]);
        assert_eq!(Locale::resolve("de-CH").guillemets, ["«", "»"]);
    }
}
