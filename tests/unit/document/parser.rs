use super::*;

#[test]
fn single_record_with_all_roles() {
    let recs = parse_document(
        "Upper: EKONOMI\nJudul: Harga Emas\nSubjudul: Naik lagi\n\n[[Harga|emas]] naik hari ini\nParagraf kedua.\n",
    );
    assert_eq!(recs.len(), 1);
    let r = &recs[0];
    assert_eq!(r.upper.as_deref(), Some("EKONOMI"));
    assert_eq!(r.title.as_deref(), Some("Harga Emas"));
    assert_eq!(r.subtitle.as_deref(), Some("Naik lagi"));
    assert_eq!(r.paragraphs, vec!["[[Harga|emas]] naik hari ini", "Paragraf kedua."]);
}

#[test]
fn prefixes_are_case_insensitive() {
    let recs = parse_document("JUDUL: A\nsubjudul: B\nupper: C\nJudul: D");
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].title.as_deref(), Some("A"));
    assert_eq!(recs[0].subtitle.as_deref(), Some("B"));
    assert_eq!(recs[1].upper.as_deref(), Some("C"));
    assert_eq!(recs[1].title.as_deref(), Some("D"));
}

#[test]
fn short_continuation_extends_header() {
    let recs = parse_document("Judul: Baris satu\nBaris dua\n[[Isi]] mulai di sini");
    assert_eq!(recs[0].title.as_deref(), Some("Baris satu\nBaris dua"));
    assert_eq!(recs[0].paragraphs, vec!["[[Isi]] mulai di sini"]);
}

#[test]
fn long_line_starts_body() {
    let long = "kata ".repeat(25);
    let input = format!("Judul: Judul\n{long}\nlanjutan pendek");
    let recs = parse_document(&input);
    assert_eq!(recs[0].title.as_deref(), Some("Judul"));
    assert_eq!(recs[0].paragraphs.len(), 2);
    assert_eq!(recs[0].paragraphs[1], "lanjutan pendek");
}

#[test]
fn repeated_title_starts_new_record() {
    let recs = parse_document("Judul: Satu\nIsi satu yang [[panjang]]\nJudul: Dua\nIsi dua [[x]]");
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[1].title.as_deref(), Some("Dua"));
    assert_eq!(recs[1].paragraphs, vec!["Isi dua [[x]]"]);
}

#[test]
fn separator_lines_split_records() {
    let recs = parse_document("Judul: Satu\n---\nJudul: Dua\n===\n===\nTanpa header");
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[2].title, None);
    assert_eq!(recs[2].paragraphs, vec!["Tanpa header"]);
}

#[test]
fn empty_input_and_empty_records_are_dropped() {
    assert!(parse_document("").is_empty());
    assert!(parse_document("\n\n---\n   \n===\n").is_empty());
    assert!(parse_document("Judul:\n---").is_empty());
}

#[test]
fn record_without_body_is_kept() {
    let recs = parse_document("Upper: A\nJudul: B");
    assert_eq!(recs.len(), 1);
    assert!(recs[0].paragraphs.is_empty());
    assert_eq!(recs[0].display_title(), "B");
}

#[test]
fn display_title_falls_back() {
    let r = Record::default();
    assert_eq!(r.display_title(), "(untitled)");
}

#[test]
fn missing_file_is_resource_error() {
    let err = parse_document_file(Path::new("/nonexistent/data.txt")).unwrap_err();
    assert!(matches!(err, TextreelError::Resource(_)));
}
