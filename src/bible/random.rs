// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Random verse selection from fixed pools of well-known references.

use rand::seq::SliceRandom;
use rand::Rng;

use super::books::Testament;
use crate::error::{BibleError, BibleResult};

/// Old Testament pool.
pub const OLD_TESTAMENT_POOL: &[&str] = &[
    "Genesis 1:1",
    "Joshua 1:9",
    "Psalms 23:1",
    "Psalms 46:10",
    "Psalms 119:105",
    "Proverbs 3:5-6",
    "Ecclesiastes 3:1",
    "Isaiah 40:31",
    "Isaiah 41:10",
    "Jeremiah 29:11",
    "Lamentations 3:22-23",
    "Micah 6:8",
];

/// New Testament pool.
pub const NEW_TESTAMENT_POOL: &[&str] = &[
    "Matthew 5:9",
    "Matthew 11:28",
    "John 1:1",
    "John 3:16",
    "John 14:6",
    "Romans 8:28",
    "Romans 12:2",
    "1 Corinthians 13:4-7",
    "Galatians 5:22-23",
    "Philippians 4:13",
    "Hebrews 11:1",
    "1 John 4:8",
];

/// Parse an optional testament filter.
///
/// `"OT"` and `"NT"` are accepted in any case; `None` or a blank string means
/// no filter. Anything else is rejected rather than widened to both pools.
pub fn parse_testament(filter: Option<&str>) -> BibleResult<Option<Testament>> {
    let Some(raw) = filter.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.to_ascii_uppercase().as_str() {
        "OT" => Ok(Some(Testament::Old)),
        "NT" => Ok(Some(Testament::New)),
        _ => Err(BibleError::validation(format!(
            "invalid testament {raw:?}; expected \"OT\" or \"NT\""
        ))),
    }
}

/// References eligible for a draw under the given filter.
pub fn pool(testament: Option<Testament>) -> Vec<&'static str> {
    match testament {
        Some(Testament::Old) => OLD_TESTAMENT_POOL.to_vec(),
        Some(Testament::New) => NEW_TESTAMENT_POOL.to_vec(),
        None => OLD_TESTAMENT_POOL
            .iter()
            .chain(NEW_TESTAMENT_POOL)
            .copied()
            .collect(),
    }
}

/// Draw one reference uniformly from the pool selected by `filter`.
pub fn select_reference(filter: Option<&str>) -> BibleResult<&'static str> {
    select_reference_with(filter, &mut rand::thread_rng())
}

/// Same as [`select_reference`] with a caller-supplied RNG.
pub fn select_reference_with<R: Rng + ?Sized>(
    filter: Option<&str>,
    rng: &mut R,
) -> BibleResult<&'static str> {
    let testament = parse_testament(filter)?;
    pool(testament)
        .choose(rng)
        .copied()
        .ok_or_else(|| BibleError::validation("no references available for selection"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::reference::VerseReference;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_testament() {
        assert_eq!(parse_testament(None).unwrap(), None);
        assert_eq!(parse_testament(Some("")).unwrap(), None);
        assert_eq!(parse_testament(Some("OT")).unwrap(), Some(Testament::Old));
        assert_eq!(parse_testament(Some(" nt ")).unwrap(), Some(Testament::New));
    }

    #[test]
    fn test_invalid_testament_names_value() {
        let err = select_reference(Some("INVALID")).unwrap_err();
        assert!(matches!(err, BibleError::Validation(_)));
        assert!(err.to_string().contains("INVALID"));
    }

    #[test]
    fn test_draws_respect_filter() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let ot = select_reference_with(Some("OT"), &mut rng).unwrap();
            assert!(OLD_TESTAMENT_POOL.contains(&ot));

            let nt = select_reference_with(Some("NT"), &mut rng).unwrap();
            assert!(NEW_TESTAMENT_POOL.contains(&nt));

            let any = select_reference_with(None, &mut rng).unwrap();
            assert!(OLD_TESTAMENT_POOL.contains(&any) || NEW_TESTAMENT_POOL.contains(&any));
        }
    }

    #[test]
    fn test_union_pool_size() {
        assert_eq!(
            pool(None).len(),
            OLD_TESTAMENT_POOL.len() + NEW_TESTAMENT_POOL.len()
        );
    }

    #[test]
    fn test_pool_entries_parse() {
        for reference in pool(None) {
            let parsed: VerseReference = reference.parse().unwrap();
            assert!(parsed.has_verses(), "{reference} should name verses");
        }
    }
}
