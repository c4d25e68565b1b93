//! Russian locale string ordering.
//!
//! Backed by the ICU `ru` tailoring, the same rules Postgres applies for the
//! `ru-RU-x-icu` collation, so in-memory sorts agree with `ORDER BY`.

use icu::collator::{Collator, CollatorBorrowed, options::CollatorOptions};
use icu::locale::locale;
use std::{cmp::Ordering, sync::OnceLock};

fn russian() -> Option<&'static CollatorBorrowed<'static>> {
    static COLLATOR: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    COLLATOR
        .get_or_init(|| {
            Collator::try_new(locale!("ru").into(), CollatorOptions::default())
                .inspect_err(|err| {
                    tracing::warn!(error = %err, "ru collator unavailable, using code point order");
                })
                .ok()
        })
        .as_ref()
}

/// Compare two strings the way a Russian reader expects them sorted.
///
/// Strings the collator considers equal fall back to code point order so the
/// result is total.
pub fn compare(a: &str, b: &str) -> Ordering {
    russian()
        .map_or_else(|| a.cmp(b), |collator| collator.compare(a, b))
        .then_with(|| a.cmp(b))
}
