//! Cyrillic to Latin transliteration used for every slug the blog derives.
//!
//! Both the admin form preview and the server-side resolution call into this
//! module, so the mapping table exists exactly once.

pub const SEPARATOR: char = '-';

/// Latin replacement for a lowercase Cyrillic letter.
///
/// `ъ` and `ь` map to the empty string. `ё` is folded into `e`.
fn cyrillic_to_latin(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Convert human text into a URL-safe identifier.
///
/// The result is either empty or matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn transliterate(text: &str) -> String {
    let mut raw = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        if let Some(latin) = cyrillic_to_latin(ch) {
            raw.push_str(latin);
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            raw.push(ch);
        } else {
            raw.push(SEPARATOR);
        }
    }
    collapse_separators(&raw)
}

/// Strip everything outside `[a-z0-9-]` and normalise separators.
///
/// Whitespace becomes a separator; other foreign characters are dropped.
pub fn sanitize(input: &str) -> String {
    let filtered: String = input
        .to_lowercase()
        .chars()
        .filter_map(|ch| {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == SEPARATOR {
                Some(ch)
            } else if ch.is_whitespace() {
                Some(SEPARATOR)
            } else {
                None
            }
        })
        .collect();
    collapse_separators(&filtered)
}

/// True when `value` already has the canonical slug shape.
pub fn is_normalized(value: &str) -> bool {
    !value.is_empty()
        && value
            .split(SEPARATOR)
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

fn collapse_separators(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending = false;
    for ch in raw.chars() {
        if ch == SEPARATOR {
            pending = !out.is_empty();
        } else {
            if pending {
                out.push(SEPARATOR);
                pending = false;
            }
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_room_title() {
        assert_eq!(transliterate("Уют в детской"), "uyut-v-detskoy");
    }

    #[test]
    fn transliterates_shch() {
        assert_eq!(transliterate("Освещение"), "osveshchenie");
    }

    #[test]
    fn hard_and_soft_signs_are_deleted() {
        assert_eq!(transliterate("Подъезд"), "podezd");
        assert_eq!(transliterate("Мебель"), "mebel");
    }

    #[test]
    fn yo_folds_into_e() {
        assert_eq!(transliterate("Ёлка"), "elka");
        assert_eq!(transliterate("ёлка"), transliterate("елка"));
    }

    #[test]
    fn latin_and_digits_pass_through() {
        assert_eq!(transliterate("IKEA Billy 2024"), "ikea-billy-2024");
    }

    #[test]
    fn punctuation_collapses_and_trims() {
        assert_eq!(transliterate("  --Садовая мебель!!! (2024)--  "), "sadovaya-mebel-2024");
        assert_eq!(transliterate("a — b"), "a-b");
    }

    #[test]
    fn unmappable_input_degrades_to_empty() {
        assert_eq!(transliterate(""), "");
        assert_eq!(transliterate("ъь"), "");
        assert_eq!(transliterate("🙂 !!! 家具"), "");
    }

    #[test]
    fn output_is_always_normalized_or_empty() {
        let samples = [
            "Диван-кровать: выбор",
            "Шкаф-купе — ёмкий и удобный",
            "Щётка, швабра и ведро",
            "Ъ ь ъ",
            "Гостиная   в стиле   лофт",
            "ЭЮЯ",
        ];
        for sample in samples {
            let slug = transliterate(sample);
            assert!(slug.is_empty() || is_normalized(&slug), "{sample} -> {slug}");
            assert!(!slug.contains("--"));
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        }
    }

    #[test]
    fn transliterate_is_idempotent_on_slugs() {
        for sample in ["sadovaya-mebel", "a-1-b", "x", "divan-krovat-2"] {
            assert_eq!(transliterate(sample), sample);
            assert_eq!(transliterate(&transliterate(sample)), transliterate(sample));
        }
    }

    #[test]
    fn sanitize_drops_foreign_characters() {
        assert_eq!(sanitize("My Slug!"), "my-slug");
        assert_eq!(sanitize("--a__b--"), "ab");
        assert_eq!(sanitize("кресло"), "");
    }

    #[test]
    fn normalized_shape() {
        assert!(is_normalized("a-b-1"));
        assert!(!is_normalized(""));
        assert!(!is_normalized("-a"));
        assert!(!is_normalized("a--b"));
        assert!(!is_normalized("A"));
    }
}
