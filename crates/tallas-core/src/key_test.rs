use super::*;

fn keys(raw: &[&str]) -> Vec<VariantKey> {
    raw.iter().map(|s| normalize(s)).collect()
}

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

#[test]
fn normalize_folds_unique_spellings() {
    assert_eq!(normalize("unica").as_str(), "UNICA");
    assert_eq!(normalize("ÚNICA").as_str(), "UNICA");
    assert_eq!(normalize("u n i c a").as_str(), "UNICA");
    assert_eq!(normalize("  Única ").as_str(), "UNICA");
}

#[test]
fn normalize_folds_cup_spellings() {
    assert_eq!(normalize("M cup 36").as_str(), "M__COPA_36");
    assert_eq!(normalize("m  COPA:36").as_str(), "M__COPA_36");
    assert_eq!(normalize("s-copa-34").as_str(), "S__COPA_34");
    assert_eq!(normalize("L copa_38").as_str(), "L__COPA_38");
    assert_eq!(normalize("xs CUP36").as_str(), "XS__COPA_36");
}

#[test]
fn normalize_unique_with_cup() {
    assert_eq!(normalize("única copa 34").as_str(), "UNICA__COPA_34");
    assert_eq!(normalize("Unica cup 36").as_str(), "UNICA__COPA_36");
}

#[test]
fn normalize_base_sizes_unchanged() {
    for size in BaseSize::ALL {
        assert_eq!(normalize(size.as_str()).as_str(), size.as_str());
        assert_eq!(normalize(&size.as_str().to_lowercase()).as_str(), size.as_str());
    }
}

#[test]
fn normalize_canonical_keys_unchanged() {
    for raw in ["UNICA", "UNICA__COPA_34", "M__COPA_36", "xs__copa_38"] {
        assert_eq!(normalize(raw).as_str(), raw.to_uppercase());
    }
}

#[test]
fn normalize_size_word_found_anywhere_with_cup() {
    assert_eq!(normalize("talla m copa 36").as_str(), "M__COPA_36");
}

#[test]
fn normalize_passes_unrecognized_labels_through() {
    assert_eq!(normalize("38").as_str(), "38");
    assert_eq!(normalize(" xl ").as_str(), "XL");
    assert_eq!(normalize("talla   grande").as_str(), "TALLA GRANDE");
    assert_eq!(normalize("").as_str(), "");
}

#[test]
fn normalize_cup_without_size_passes_through() {
    assert_eq!(normalize("xl cup 36").as_str(), "XL COPA 36");
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        "unica",
        "ÚNICA copa 34",
        "u n i c a",
        "M cup 36",
        "m  COPA:36",
        "xl cup 36",
        "38",
        "37.5",
        "talla grande",
        "cups 34",
        "S-CUP-36",
        "  ",
        "XL__COPA_34",
        "ñandú",
    ];
    for raw in samples {
        let once = normalize(raw);
        let twice = normalize(once.as_str());
        assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
    }
}

#[test]
fn deserialize_normalizes_key() {
    let key: VariantKey = serde_json::from_str("\"m cup 36\"").unwrap();
    assert_eq!(key.as_str(), "M__COPA_36");
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"M__COPA_36\"");
}

// -----------------------------------------------------------------------
// key accessors
// -----------------------------------------------------------------------

#[test]
fn key_accessors() {
    let key = normalize("M__COPA_36");
    assert_eq!(key.cup(), Some(36));
    assert_eq!(key.base_size(), Some(BaseSize::M));
    assert!(key.has_cup());
    assert!(!key.is_unique());

    let unique = normalize("UNICA__COPA_34");
    assert!(unique.is_unique());
    assert_eq!(unique.base_size(), None);
    assert_eq!(unique.cup(), Some(34));

    assert_eq!(normalize("38").cup(), None);
}

#[test]
fn from_parts_builds_canonical_keys() {
    assert_eq!(VariantKey::from_parts(Some(BaseSize::Xs), None).as_str(), "XS");
    assert_eq!(VariantKey::from_parts(None, None).as_str(), "UNICA");
    assert_eq!(VariantKey::from_parts(None, Some(34)).as_str(), "UNICA__COPA_34");
    assert_eq!(
        VariantKey::from_parts(Some(BaseSize::L), Some(38)).as_str(),
        "L__COPA_38"
    );
}

// -----------------------------------------------------------------------
// infer_mode
// -----------------------------------------------------------------------

#[test]
fn infer_mode_base_sizes_only() {
    assert_eq!(infer_mode(&keys(&["XS", "M", "L"])), VariantMode::BaseSizeOnly);
}

#[test]
fn infer_mode_unique_only() {
    assert_eq!(infer_mode(&keys(&["UNICA"])), VariantMode::UniqueOnly);
}

#[test]
fn infer_mode_unique_with_cup() {
    assert_eq!(infer_mode(&keys(&["UNICA__COPA_34"])), VariantMode::UniqueWithCup);
}

#[test]
fn infer_mode_base_size_with_cup() {
    assert_eq!(
        infer_mode(&keys(&["S__COPA_36", "M__COPA_36"])),
        VariantMode::BaseSizeWithCup
    );
}

#[test]
fn infer_mode_empty_defaults_to_base_sizes() {
    assert_eq!(infer_mode(&Vec::<VariantKey>::new()), VariantMode::BaseSizeOnly);
}

#[test]
fn infer_mode_unique_with_cup_wins_regardless_of_order() {
    let mut list = keys(&["M__COPA_36", "UNICA", "UNICA__COPA_34", "S"]);
    assert_eq!(infer_mode(&list), VariantMode::UniqueWithCup);
    list.reverse();
    assert_eq!(infer_mode(&list), VariantMode::UniqueWithCup);
}

#[test]
fn infer_mode_numeric_shoe_sizes_fall_back() {
    assert_eq!(infer_mode(&keys(&["38", "39"])), VariantMode::BaseSizeOnly);
}

// -----------------------------------------------------------------------
// cups and parsing
// -----------------------------------------------------------------------

#[test]
fn discover_and_merge_cups() {
    let found = discover_cups(&keys(&["S__COPA_38", "M__COPA_34", "L"]));
    assert_eq!(found.iter().copied().collect::<Vec<_>>(), vec![34, 38]);
    assert_eq!(merged_cups(&DEFAULT_CUP_SIZES, &found), vec![34, 36, 38]);
}

#[test]
fn variant_mode_parses_legacy_tags() {
    assert_eq!("XS_L".parse::<VariantMode>().unwrap(), VariantMode::BaseSizeOnly);
    assert_eq!("UNICA".parse::<VariantMode>().unwrap(), VariantMode::UniqueOnly);
    assert_eq!("UNICA_COPA".parse::<VariantMode>().unwrap(), VariantMode::UniqueWithCup);
    assert_eq!("xs_l_copa".parse::<VariantMode>().unwrap(), VariantMode::BaseSizeWithCup);
    assert_eq!(
        "base-size-with-cup".parse::<VariantMode>().unwrap(),
        VariantMode::BaseSizeWithCup
    );
    assert!(matches!(
        "grid".parse::<VariantMode>(),
        Err(VariantError::UnknownMode(_))
    ));
}

#[test]
fn base_size_parse_rejects_unknown() {
    assert_eq!(" xs ".parse::<BaseSize>().unwrap(), BaseSize::Xs);
    assert!(matches!("XL".parse::<BaseSize>(), Err(VariantError::UnknownSize(_))));
}

#[test]
fn cup_digits_drop_leading_zeros() {
    assert_eq!(normalize("S copa 036").as_str(), "S__COPA_36");
    assert_eq!(normalize("S__COPA_036").as_str(), "S__COPA_36");
    assert_eq!(normalize("unica copa 0").as_str(), "UNICA__COPA_0");
    assert_eq!(normalize("S copa 036"), normalize("s cup 36"));

    let key = normalize("M copa 0038");
    assert_eq!(normalize(key.as_str()), key);
    assert_eq!(key.cup(), Some(38));
}
