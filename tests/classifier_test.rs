//! Classification properties over generated inputs.

use proptest::prelude::*;
use vidbox::classifier::{classify, is_valid_video_reference, to_embed_url, ProviderKind};

const YOUTUBE_ID: &str = "[a-zA-Z0-9_-]{11}";

proptest! {
    #[test]
    fn short_links_embed_their_id(id in YOUTUBE_ID, prefix in "(https?://)?", suffix in "(\\?t=[0-9]{1,3})?") {
        let url = format!("{}youtu.be/{}{}", prefix, id, suffix);
        prop_assert_eq!(classify(&url), ProviderKind::YouTube);
        prop_assert_eq!(to_embed_url(&url), format!("https://www.youtube.com/embed/{}", id));
        prop_assert!(is_valid_video_reference(&url));
    }

    #[test]
    fn watch_links_embed_their_id(id in YOUTUBE_ID, www in "(www\\.)?") {
        let url = format!("https://{}youtube.com/watch?v={}", www, id);
        prop_assert_eq!(classify(&url), ProviderKind::YouTube);
        prop_assert_eq!(to_embed_url(&url), format!("https://www.youtube.com/embed/{}", id));
    }

    #[test]
    fn tiktok_links_embed_their_id(user in "[a-z0-9_.]{1,24}", id in "[0-9]{1,19}") {
        let url = format!("https://www.tiktok.com/@{}/video/{}", user, id);
        prop_assert_eq!(classify(&url), ProviderKind::TikTok);
        prop_assert_eq!(to_embed_url(&url), format!("https://www.tiktok.com/embed/v2/{}", id));
    }

    #[test]
    fn classification_is_total(input in "\\PC*") {
        let kind = classify(&input);
        let embed = to_embed_url(&input);
        if kind == ProviderKind::Device {
            prop_assert_eq!(embed, input);
        } else {
            prop_assert!(embed.starts_with("https://www."));
        }
    }

    #[test]
    fn plain_words_are_device_and_invalid(words in "[a-z ]{0,40}") {
        prop_assert_eq!(classify(&words), ProviderKind::Device);
        prop_assert_eq!(to_embed_url(&words), words.clone());
        prop_assert!(!is_valid_video_reference(&words));
    }

    #[test]
    fn media_extensions_are_valid_in_any_case(
        stem in "[a-zA-Z0-9/_-]{1,30}",
        ext in "(mp4|webm|ogg|mov|MP4|WebM|OGG|Mov)",
    ) {
        let url = format!("https://cdn.example.com/{}.{}", stem, ext);
        prop_assert!(is_valid_video_reference(&url));
        prop_assert_eq!(classify(&url), ProviderKind::Device);
    }
}

#[test]
fn documented_examples() {
    assert!(is_valid_video_reference("foo.mp4"));
    assert!(is_valid_video_reference("https://youtu.be/dQw4w9WgXcQ"));
    assert!(!is_valid_video_reference("not a url"));

    assert_eq!(
        to_embed_url("https://www.youtube.com/embed/dQw4w9WgXcQ"),
        "https://www.youtube.com/embed/dQw4w9WgXcQ"
    );
    assert_eq!(classify("https://example.com/movie.mkv"), ProviderKind::Device);
    assert!(!is_valid_video_reference("https://example.com/movie.mkv"));
}
