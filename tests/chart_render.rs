use phonochart::catalog::{PhoneticEntry, SymbolCatalog};
use phonochart::chart::{render_catalog, ChartPage, ContainerId, RenderTarget};

#[test]
fn renders_one_labelled_button_per_entry_in_catalog_order() {
    let catalog = SymbolCatalog::default();
    let mut page = ChartPage::new();
    let report = render_catalog(&catalog, &mut page);

    assert_eq!(report.rendered, catalog.len());
    assert!(report.missing.is_empty());

    for (container, entries) in [
        (ContainerId::Vowels, catalog.vowels()),
        (ContainerId::Consonants, catalog.consonants()),
    ] {
        let rendered = page.children(container).unwrap();
        let labels: Vec<_> = rendered.iter().map(|element| element.label()).collect();
        let expected: Vec<_> = entries.iter().map(|e| format!("/{}/", e.symbol)).collect();
        assert_eq!(labels, expected);
        assert!(rendered.iter().all(|element| element.interactive));
        assert!(rendered.iter().all(|element| !element.highlighted));
    }
    assert!(page.follow_along().is_empty());
}

#[test]
fn buttons_carry_their_audio_paths() {
    let catalog = SymbolCatalog::new(
        vec![PhoneticEntry::new("ə", "sounds/schwa.mp3")],
        vec![PhoneticEntry::new("ʃ", "sounds/sh.mp3")],
    )
    .unwrap();
    let mut page = ChartPage::new();
    render_catalog(&catalog, &mut page);

    let vowel = &page.children(ContainerId::Vowels).unwrap()[0];
    assert_eq!(vowel.label(), "/ə/");
    assert_eq!(vowel.audio_path, "sounds/schwa.mp3");
    let consonant = &page.children(ContainerId::Consonants).unwrap()[0];
    assert_eq!(consonant.audio_path, "sounds/sh.mp3");
}
