use super::*;

fn seg(content: &str, is_highlighted: bool) -> TextSegment {
    TextSegment {
        content: content.to_owned(),
        is_highlighted,
    }
}

#[test]
fn plain_text_is_one_segment() {
    assert_eq!(parse_markup("naik hari ini"), vec![seg("naik hari ini", false)]);
}

#[test]
fn empty_input_yields_no_segments() {
    assert!(parse_markup("").is_empty());
}

#[test]
fn highlighted_spans_alternate_with_plain_text() {
    assert_eq!(
        parse_markup("Harga [[emas]] naik [[tajam]]"),
        vec![
            seg("Harga ", false),
            seg("emas", true),
            seg(" naik ", false),
            seg("tajam", true),
        ]
    );
}

#[test]
fn pipes_become_spaces_inside_and_outside_spans() {
    assert_eq!(
        parse_markup("[[Harga|emas]] naik|hari ini"),
        vec![seg("Harga emas", true), seg(" naik hari ini", false)]
    );
}

#[test]
fn empty_spans_are_dropped() {
    assert_eq!(
        parse_markup("a [[]] b"),
        vec![seg("a ", false), seg(" b", false)]
    );
}

#[test]
fn unmatched_open_fails_soft() {
    assert_eq!(
        parse_markup("Harga [[emas naik"),
        vec![seg("Harga [[emas naik", false)]
    );
}

#[test]
fn stray_close_fails_soft() {
    assert_eq!(
        parse_markup("Harga emas]] naik"),
        vec![seg("Harga emas]] naik", false)]
    );
    assert_eq!(
        parse_markup("[[a]] b]]"),
        vec![seg("[[a]] b]]", false)]
    );
}

#[test]
fn nesting_fails_soft() {
    assert_eq!(
        parse_markup("[[a [[b]] c]]"),
        vec![seg("[[a [[b]] c]]", false)]
    );
}

#[test]
fn concatenation_equals_input_without_delimiters() {
    let inputs = [
        "[[Harga|emas]] naik hari ini",
        "Rp [[5|juta]] per [[gram]], di pasar",
        "  spaced [[ out ]]  ",
        "no markup at all",
        "[[a]][[b]]",
    ];
    for input in inputs {
        let joined: String = parse_markup(input)
            .into_iter()
            .map(|s| s.content)
            .collect();
        let expected = input.replace("[[", "").replace("]]", "").replace('|', " ");
        assert_eq!(joined, expected, "input {input:?}");
    }
}

#[test]
fn plain_text_strips_markup() {
    assert_eq!(plain_text("[[Harga|emas]] naik"), "Harga emas naik");
}
