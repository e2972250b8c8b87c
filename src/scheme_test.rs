use super::*;

// =============================================================================
// derive_invert
// =============================================================================

#[test]
fn invert_is_absent_for_system() {
    assert_eq!(derive_invert(Scheme::System, Appearance::Light), None);
    assert_eq!(derive_invert(Scheme::System, Appearance::Dark), None);
}

#[test]
fn invert_when_forced_scheme_disagrees_with_system() {
    assert_eq!(derive_invert(Scheme::Dark, Appearance::Light), Some(true));
    assert_eq!(derive_invert(Scheme::Light, Appearance::Dark), Some(true));
}

#[test]
fn no_invert_when_forced_scheme_matches_system() {
    assert_eq!(derive_invert(Scheme::Light, Appearance::Light), Some(false));
    assert_eq!(derive_invert(Scheme::Dark, Appearance::Dark), Some(false));
}

// =============================================================================
// Toggle policy
// =============================================================================

#[test]
fn toggled_from_system_lands_on_dark() {
    assert_eq!(Scheme::System.toggled(), Scheme::Dark);
}

#[test]
fn toggled_alternates_between_forced_values() {
    assert_eq!(Scheme::Dark.toggled(), Scheme::Light);
    assert_eq!(Scheme::Light.toggled(), Scheme::Dark);
}

// =============================================================================
// Parsing and serde
// =============================================================================

#[test]
fn scheme_parses_known_names() {
    assert_eq!("system".parse::<Scheme>().unwrap(), Scheme::System);
    assert_eq!("light".parse::<Scheme>().unwrap(), Scheme::Light);
    assert_eq!("dark".parse::<Scheme>().unwrap(), Scheme::Dark);
}

#[test]
fn scheme_rejects_unknown_name() {
    let err = "sepia".parse::<Scheme>().expect_err("sepia is not a scheme");
    assert_eq!(err.to_string(), "unknown scheme: sepia");
}

#[test]
fn appearance_rejects_system() {
    assert!("system".parse::<Appearance>().is_err());
}

#[test]
fn scheme_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Scheme::Dark).unwrap(), "\"dark\"");
    let parsed: Scheme = serde_json::from_str("\"system\"").unwrap();
    assert_eq!(parsed, Scheme::System);
}

#[test]
fn defaults_are_system_and_light() {
    assert_eq!(Scheme::default(), Scheme::System);
    assert_eq!(Appearance::default(), Appearance::Light);
}
