use super::*;
use crate::foundation::rng::Rng64;
use crate::text::font::FontLoader;

fn compositor() -> ShareCompositor<Rng64> {
    let fonts = FontLoader::new("Caveat")
        .without_system_fonts()
        .with_search_dirs(Vec::new());
    ShareCompositor::new(Rng64::new(11), fonts, "dailydoseofmotivation.app")
}

fn tiny_image() -> ImageBuffer {
    ImageBuffer {
        width: 1,
        height: 1,
        format: crate::share::encode::ImageFormat::Png,
        bytes: vec![1, 2, 3],
    }
}

#[test]
fn accepted_share_uses_story_card() {
    let mut target = InMemoryTarget::new(true);
    let outcome = share_quote(&mut compositor(), &mut target, "Keep going.").unwrap();
    assert_eq!(outcome, ShareOutcome::Story);
    assert_eq!(target.share_attempts.len(), 1);
    let (caption, image) = &target.share_attempts[0];
    assert_eq!(caption, "Keep going.");
    assert_eq!((image.width, image.height), (1080, 1920));
}

#[test]
fn declined_share_falls_back_to_square_card() {
    let mut target = InMemoryTarget::new(false);
    let outcome = share_quote(&mut compositor(), &mut target, "Keep going.").unwrap();
    assert_eq!(outcome, ShareOutcome::NotShared);
    let sizes: Vec<_> = target
        .share_attempts
        .iter()
        .map(|(_, img)| (img.width, img.height))
        .collect();
    assert_eq!(sizes, vec![(1080, 1920), (1080, 1080)]);
}

#[test]
fn download_uses_default_file_name() {
    let mut target = InMemoryTarget::default();
    let image = download_quote(&mut compositor(), &mut target, "Start now.").unwrap();
    assert_eq!(target.downloads.len(), 1);
    assert_eq!(target.downloads[0].0, DEFAULT_FILENAME);
    assert_eq!(target.downloads[0].1, image);
}

#[test]
fn file_names_must_be_plain() {
    let mut target = InMemoryTarget::default();
    assert!(target.download_image(&tiny_image(), "../escape.png").is_err());
    assert!(target.download_image(&tiny_image(), "a/b.png").is_err());
    assert!(target.download_image(&tiny_image(), "").is_err());
    assert!(target.download_image(&tiny_image(), "ok.png").is_ok());
}

#[test]
fn directory_target_writes_file_and_cannot_share() {
    let dir = std::env::temp_dir().join(format!("quotedoodle-deliver-{}", std::process::id()));
    let mut target = DirectoryTarget::new(&dir);
    target.download_image(&tiny_image(), "card.png").unwrap();
    assert_eq!(std::fs::read(dir.join("card.png")).unwrap(), vec![1, 2, 3]);
    assert!(!target.share_image(&tiny_image(), "caption"));
    let _ = std::fs::remove_dir_all(&dir);
}
