use super::*;

fn isolated() -> FontLoader {
    FontLoader::new("Caveat")
        .without_system_fonts()
        .with_search_dirs(Vec::new())
}

#[test]
fn garbage_bytes_are_a_font_error() {
    let err = LoadedFont::from_bytes(vec![0, 1, 2, 3], FontOrigin::Preferred).unwrap_err();
    assert!(err.to_string().starts_with("font error:"));
}

#[test]
fn missing_file_is_a_font_error() {
    let err = LoadedFont::from_file(Path::new("/definitely/not/here.ttf")).unwrap_err();
    assert!(err.to_string().contains("here.ttf"));
}

#[test]
fn empty_database_resolves_nothing() {
    let loader = isolated().with_font_file(Some(PathBuf::from("/definitely/not/here.ttf")));
    assert!(loader.load().is_none());
}

#[test]
fn recognizes_font_extensions() {
    assert!(is_font_file(Path::new("a/Caveat-Bold.TTF")));
    assert!(is_font_file(Path::new("b.otf")));
    assert!(is_font_file(Path::new("c.ttc")));
    assert!(!is_font_file(Path::new("d.woff2")));
    assert!(!is_font_file(Path::new("noext")));
}

#[test]
fn keeps_preferred_family() {
    assert_eq!(isolated().preferred_family(), "Caveat");
}

#[test]
fn generic_family_picks_first_installed_candidate() {
    let installed: BTreeSet<String> = ["DejaVu Math TeX Gyre", "DejaVu Sans", "Noto Sans"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(
        first_installed(&installed, &SANS_SERIF_FAMILIES),
        Some("DejaVu Sans")
    );
    assert_eq!(first_installed(&installed, &SERIF_FAMILIES), None);
}

#[test]
fn fallback_text_face_is_none_for_an_empty_database() {
    assert!(fallback_text_face(&usvg::fontdb::Database::new()).is_none());
}

#[test]
fn unknown_family_falls_back_to_an_installed_generic_text_face() {
    let loader = FontLoader::new("No Such Family 7f3a").with_search_dirs(Vec::new());
    let installed = installed_families(&loader.build_fontdb());
    let generic = first_installed(&installed, &SERIF_FAMILIES)
        .or_else(|| first_installed(&installed, &SANS_SERIF_FAMILIES));
    let Some(expected) = generic else {
        // no well-known text family on this machine
        return;
    };
    let font = loader.load().unwrap();
    assert!(matches!(font.origin, FontOrigin::Fallback(_)));
    let cursive = first_installed(&installed, &CURSIVE_FAMILIES);
    assert!(
        Some(font.family.as_str()) == cursive || font.family == expected,
        "got {}",
        font.family
    );
}
