use std::future::Future;

/// Find the first free slug in `base`, `base-1`, `base-2`, ...
///
/// `exists` is called once per candidate and its error is returned untouched.
/// Callers updating an existing entity must make `exists` ignore that entity's
/// own row, otherwise an unchanged slug would pick up a suffix.
pub async fn resolve_unique<F, Fut, E>(base: &str, mut exists: F) -> Result<String, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let mut candidate = base.to_owned();
    let mut counter = 1u64;

    while exists(candidate.clone()).await? {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::future::ready;

    #[tokio::test]
    async fn skips_taken_candidates() {
        let taken = ["sadovaya-mebel", "sadovaya-mebel-1"];
        let slug = resolve_unique("sadovaya-mebel", |candidate| {
            ready(Ok::<_, Infallible>(taken.contains(&candidate.as_str())))
        })
        .await
        .unwrap();
        assert_eq!(slug, "sadovaya-mebel-2");
    }

    #[tokio::test]
    async fn free_base_keeps_no_suffix() {
        let calls = Cell::new(0);
        let slug = resolve_unique("x", |_| {
            calls.set(calls.get() + 1);
            ready(Ok::<_, Infallible>(false))
        })
        .await
        .unwrap();
        assert_eq!(slug, "x");
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn lookup_errors_propagate() {
        let result = resolve_unique("x", |_| ready(Err::<bool, _>("db down"))).await;
        assert_eq!(result, Err("db down"));
    }
}
