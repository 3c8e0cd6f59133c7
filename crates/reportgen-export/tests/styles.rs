use reportgen_export::styles::compose_document;
use reportgen_export::{PageLayout, PaperFormat, Stylesheet};

#[test]
fn default_layout_is_a4_with_3mm_margins_and_backgrounds() {
    let layout = PageLayout::default();
    assert_eq!(layout.format, PaperFormat::A4);
    let rules = layout.page_rules();
    assert!(rules.contains("size: A4"));
    assert!(rules.contains("margin: 3mm"));
    assert!(rules.contains("print-color-adjust: exact"));
}

#[test]
fn backgrounds_can_be_turned_off() {
    let layout = PageLayout {
        print_background: false,
        ..PageLayout::default()
    };
    assert!(!layout.page_rules().contains("print-color-adjust"));
}

#[test]
fn stylesheet_overrides_layout_when_preferred() {
    let css = Stylesheet::inline("@page { size: letter landscape; } .x { color: red; }");
    let doc = compose_document("<p>body</p>", &css, &PageLayout::default());

    let layout_at = doc.find("size: A4").unwrap();
    let css_at = doc.find("letter landscape").unwrap();
    let body_at = doc.find("<p>body</p>").unwrap();
    assert!(layout_at < css_at);
    assert!(css_at < body_at);
}

#[test]
fn layout_overrides_stylesheet_when_not_preferred() {
    let css = Stylesheet::inline("@page { size: letter; }");
    let layout = PageLayout {
        prefer_css_page_size: false,
        ..PageLayout::default()
    };
    let doc = compose_document("<p>body</p>", &css, &layout);
    assert!(doc.find("size: letter").unwrap() < doc.find("size: A4").unwrap());
}

#[test]
fn missing_stylesheet_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Stylesheet::load(&dir.path().join("absent.css")).is_err());
}

#[test]
fn stylesheet_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.css");
    std::fs::write(&path, ".title { font-weight: 700; }").unwrap();
    let css = Stylesheet::load(&path).unwrap();
    assert_eq!(css.as_str(), ".title { font-weight: 700; }");
}
