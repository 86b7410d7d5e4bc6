use std::fs;
use std::path::Path;

use contents_i18n::{I18nError, Project, Summary, TranslationMemory};
use tempfile::TempDir;

const PAGE_MODEL: &str = "[model]
name = Page

[fields.title]
type = string
translate = True

[fields.slug]
type = string

[fields.body]
type = markdown
translate = True

[fields.blocks]
type = flow
";

const TEXT_BLOCK: &str = "[block]
name = Text

[fields.text]
type = markdown
translate = true
";

const GERMAN: &str = r#"msgid ""
msgstr ""
"Language: de\n"

msgid "Welcome"
msgstr "Willkommen"

msgid "Hello there."
msgstr "Hallo zusammen."
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site(config: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "configs/i18n.ini", config);
    write(root, "models/page.ini", PAGE_MODEL);
    write(root, "flowblocks/text.ini", TEXT_BLOCK);
    write(
        root,
        "content/contents.lr",
        "title: Welcome\n---\nbody:\n\nHello there.\n\nSecond paragraph.\n",
    );
    write(
        root,
        "content/about/contents.lr",
        "title: About\n---\nslug: about-us\n---\nbody:\n\nHello there.\n---\nblocks:\n\n#### text ####\ntext: Inside a block\n",
    );
    write(root, "i18n/contents+de.po", GERMAN);
    dir
}

const CONFIG: &str = "content = en\ntranslations = de\nurl_prefix = https://example.com/\n";

#[test]
fn test_missing_translations_option() {
    let dir = site("content = en\n");
    let err = Project::open(dir.path()).unwrap_err();
    assert!(matches!(err, I18nError::ConfigurationMissing { .. }));
    assert!(err.to_string().contains("'translations'"));
}

#[test]
fn test_collect_records_provenance() {
    let dir = site(CONFIG);
    let project = Project::open(dir.path()).unwrap();
    let mut memory = TranslationMemory::new();
    let summary = project.collect(&mut memory).unwrap();

    assert_eq!(summary, Summary { documents: 2, skipped: 0 });
    assert!(memory.contains("Welcome"));
    assert!(memory.contains("Second paragraph."));
    assert!(!memory.contains("about-us"));

    let mut sources = memory.get("Hello there.").unwrap().sources.clone();
    sources.sort();
    assert_eq!(
        sources,
        vec![
            "https://example.com/ (content/contents.lr:page.body)",
            "https://example.com/about/ (content/about/contents.lr:page.body)",
        ]
    );
    assert_eq!(
        memory.get("Inside a block").unwrap().sources,
        vec!["https://example.com/about/ (content/about/contents.lr:text.text)"]
    );
}

#[test]
fn test_template_contents() {
    let dir = site(CONFIG);
    let project = Project::open(dir.path()).unwrap();
    let mut memory = TranslationMemory::new();
    project.collect(&mut memory).unwrap();
    project.write_template(&memory).unwrap();

    let pot = fs::read_to_string(dir.path().join("i18n/contents.pot")).unwrap();
    assert!(pot.starts_with("msgid \"\"\nmsgstr \"\"\n"));
    assert!(pot.contains("\"Language: en\\n\"\n"));
    assert!(pot.contains(
        "#: https://example.com/ (content/contents.lr:page.title)\nmsgid \"Welcome\"\nmsgstr \"\"\n\n"
    ));
    assert!(pot.contains(
        "#: https://example.com/ (content/contents.lr:page.body) https://example.com/about/ (content/about/contents.lr:page.body)\nmsgid \"Hello there.\"\n"
    ));
    assert!(!pot.contains("about-us"));
}

#[test]
fn test_translated_documents() {
    let dir = site(CONFIG);
    let project = Project::open(dir.path()).unwrap();
    let summary = project.translate_contents().unwrap();
    assert_eq!(summary, Summary { documents: 2, skipped: 0 });

    let german = fs::read_to_string(dir.path().join("content/contents+de.lr")).unwrap();
    assert_eq!(
        german,
        "title: Willkommen\n---\nbody:\n\nHallo zusammen.\n\nSecond paragraph.\n"
    );

    // the content language has no catalog and is written untranslated
    let english = fs::read_to_string(dir.path().join("content/contents+en.lr")).unwrap();
    let source = fs::read_to_string(dir.path().join("content/contents.lr")).unwrap();
    assert_eq!(english, source);

    let about = fs::read_to_string(dir.path().join("content/about/contents+de.lr")).unwrap();
    assert!(about.starts_with("title: About\n---\nslug: about-us\n"));
    assert!(about.contains("Hallo zusammen.\n"));
}

#[test]
fn test_alternatives_after_translation() {
    let dir = site(CONFIG);
    let project = Project::open(dir.path()).unwrap();
    project.translate_contents().unwrap();

    let mut memory = TranslationMemory::new();
    let summary = project.collect(&mut memory).unwrap();
    assert_eq!(summary.documents, 6);
    assert!(!memory.contains("Willkommen"));
    assert!(
        memory
            .get("Welcome")
            .unwrap()
            .sources
            .contains(&"https://example.com/ (content/contents+en.lr:page.title)".to_string())
    );
}

#[test]
fn test_paragraphwise_extraction() {
    let dir = site("translations = de\ntranslate_paragraphwise = True\n");
    write(
        dir.path(),
        "content/contents.lr",
        "body:\n\nFirst line\nsecond line\n\nNext\n",
    );
    let project = Project::open(dir.path()).unwrap();
    let mut memory = TranslationMemory::new();
    project.collect(&mut memory).unwrap();

    assert!(memory.contains("First line\nsecond line"));
    assert!(memory.contains("Next"));
    assert!(!memory.contains("First line"));
    assert_eq!(
        memory.get("Next").unwrap().sources,
        vec!["http://localhost/ (content/contents.lr:page.body)"]
    );
}

#[test]
fn test_unreadable_document_is_skipped() {
    let dir = site(CONFIG);
    write(dir.path(), "content/aaa/contents.lr", "");
    fs::write(dir.path().join("content/aaa/contents.lr"), [0xff, 0xfe, 0x00]).unwrap();

    let project = Project::open(dir.path()).unwrap();
    let mut memory = TranslationMemory::new();
    let summary = project.collect(&mut memory).unwrap();
    assert_eq!(summary, Summary { documents: 2, skipped: 1 });
    assert!(memory.contains("Welcome"));
}

#[test]
fn test_disabled_project_does_nothing() {
    let dir = site("enable = false\ntranslations = de\n");
    let project = Project::open(dir.path()).unwrap();

    let mut memory = TranslationMemory::new();
    assert_eq!(project.collect(&mut memory).unwrap(), Summary::default());
    assert!(memory.is_empty());

    project.write_template(&memory).unwrap();
    assert!(!dir.path().join("i18n/contents.pot").exists());

    project.translate_contents().unwrap();
    assert!(!dir.path().join("content/contents+de.lr").exists());
}

#[test]
fn test_crlf_document_paragraphwise_round_trip() {
    let dir = site("translations = de\ntranslate_paragraphwise = True\n");
    write(
        dir.path(),
        "content/contents.lr",
        "body:\r\n\r\nFirst line\r\nsecond line\r\n",
    );
    let project = Project::open(dir.path()).unwrap();

    let mut memory = TranslationMemory::new();
    project.collect(&mut memory).unwrap();
    assert!(memory.contains("First line\nsecond line"));

    write(
        dir.path(),
        "i18n/contents+de.po",
        "msgid \"First line\\nsecond line\"\nmsgstr \"Erste Zeile\\nzweite Zeile\"\n",
    );
    project.translate_contents().unwrap();

    let german = fs::read_to_string(dir.path().join("content/contents+de.lr")).unwrap();
    assert_eq!(german, "body:\r\n\r\nErste Zeile\r\nzweite Zeile\r\n");
}

#[test]
fn test_gettext_style_language_code() {
    let dir = site("translations = pt_BR\n");
    write(
        dir.path(),
        "i18n/contents+pt_BR.po",
        "msgid \"Welcome\"\nmsgstr \"Bem-vindo\"\n",
    );
    let project = Project::open(dir.path()).unwrap();
    project.translate_contents().unwrap();

    let portuguese = fs::read_to_string(dir.path().join("content/contents+pt_BR.lr")).unwrap();
    assert!(portuguese.starts_with("title: Bem-vindo\n"));
}
