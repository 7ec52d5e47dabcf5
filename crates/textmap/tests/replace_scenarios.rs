use textmap::{Error, MatchOptions, ReplaceOptions, TextIndex};
use textmap_test_support::{ARACARI_TEXT, aracari_paragraph, element, text};

fn paragraph(content: &str) -> textmap_test_support::SimpleNode {
    element("div", vec![element("p", vec![text(content)])])
}

#[test]
fn replaces_only_the_first_occurrence_by_default() {
    let source = paragraph("all the foo people are all bar");
    let mut index = TextIndex::new(&source);
    let todo = index.create_text_node("todo");
    index
        .replace_text("all", &[todo], ReplaceOptions::default())
        .unwrap();
    assert_eq!(index.get_text(), "todo the foo people are all bar");
}

#[test]
fn replacement_index_selects_a_later_occurrence() {
    let source = paragraph("all the foo people are all bar");
    let mut index = TextIndex::new(&source);
    let todo = index.create_text_node("todo");
    index
        .replace_text(
            "all",
            &[todo],
            ReplaceOptions {
                replacement_index: 1,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(index.get_text(), "all the foo people are todo bar");
}

#[test]
fn whole_word_replacement_skips_mid_word_fragments() {
    let source = paragraph("Done is the one thing.");
    let mut index = TextIndex::new(&source);
    let uno = index.create_text_node("uno");
    index
        .replace_text(
            "one",
            &[uno],
            ReplaceOptions {
                whole_word: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(index.get_text(), "Done is the uno thing.");
}

#[test]
fn whole_word_replacement_works_for_multi_word_queries() {
    let source = paragraph("Foo bar or oo bar");
    let mut index = TextIndex::new(&source);
    let replacement = index.create_text_node("foo bar");
    index
        .replace_text(
            "oo bar",
            &[replacement],
            ReplaceOptions {
                whole_word: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(index.get_text(), "Foo bar or foo bar");
}

#[test]
fn surrounding_text_is_preserved_as_sibling_fragments() {
    let source = aracari_paragraph();
    let mut index = TextIndex::new(&source);

    let target = index
        .get_text_node("genus", MatchOptions::default())
        .expect("genus is in a single leaf");
    assert_eq!(index.text_of(target), Some(", make up the genus "));
    let parent = index.parent(target).unwrap();
    let before = index.children(parent).len();

    let replacement = index.create_text_node("genus");
    index
        .replace_text("genus", &[replacement], ReplaceOptions::default())
        .unwrap();

    // identical text, two fragment nodes appended around the replacement
    assert_eq!(index.get_text(), ARACARI_TEXT);
    assert_eq!(index.children(parent).len(), before + 2);

    let node = index
        .get_text_node("genus", MatchOptions::default())
        .expect("replacement node maps a fresh entry");
    assert_eq!(node, replacement);
    let previous = index.previous_sibling(node).unwrap();
    let next = index.next_sibling(node).unwrap();
    assert_eq!(index.text_of(previous), Some(", make up the "));
    assert_eq!(index.text_of(next), Some(" "));
}

#[test]
fn empty_fragments_are_omitted_not_inserted() {
    let source = aracari_paragraph();
    let mut index = TextIndex::new(&source);
    let strong = index.create_element("strong");
    index.set_text(strong, "hermosa");
    let tail = index.create_text_node(" toucans");
    index
        .replace_text("toucans", &[strong, tail], ReplaceOptions::default())
        .unwrap();

    assert_eq!(
        index.get_text(),
        "An aracari or araçari is any of the medium-sized hermosa toucans that, together \
         with the saffron toucanet, make up the genus Pteroglossus."
    );
    // the whole leaf matched: no fragment nodes, just the two replacements
    let link = index.get_node_by_address("0.5").unwrap().unwrap();
    assert_eq!(index.children(link).len(), 2);
}

#[test]
fn replace_at_an_explicit_address() {
    let source = aracari_paragraph();
    let mut index = TextIndex::new(&source);
    let el = index.create_text_node("el");
    index
        .replace_text(
            "the",
            &[el],
            ReplaceOptions {
                at: Some("0.8".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(
        index.get_text(),
        "An aracari or araçari is any of the medium-sized toucans that, together with \
         the saffron toucanet, make up el genus Pteroglossus."
    );
}

#[test]
fn whole_word_mode_refuses_substring_only_occurrences() {
    let source = paragraph("the saffron toucanet");
    let mut index = TextIndex::new(&source);
    let replacement = index.create_text_node("hornbill");
    let err = index
        .replace_text(
            "toucan",
            &[replacement],
            ReplaceOptions {
                whole_word: true,
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, Error::TextNotFound);
}

#[test]
fn out_of_range_replacement_index_is_text_not_found() {
    let source = paragraph("one lonely occurrence");
    let mut index = TextIndex::new(&source);
    let replacement = index.create_text_node("x");
    let err = index
        .replace_text(
            "lonely",
            &[replacement],
            ReplaceOptions {
                replacement_index: 3,
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, Error::TextNotFound);
}

#[test]
fn a_failed_replace_leaves_tree_mapping_and_log_untouched() {
    let source = paragraph("the saffron toucanet");
    let mut index = TextIndex::new(&source);
    let replacement = index.create_text_node("hornbill");
    let log_before = index.get_diff().len();
    let text_before = index.get_text();

    let result = index.replace_text(
        "toucan",
        &[replacement],
        ReplaceOptions {
            whole_word: true,
            ..Default::default()
        },
    );

    assert!(result.is_err());
    assert_eq!(index.get_text(), text_before);
    assert_eq!(index.get_diff().len(), log_before);
}

#[test]
fn addresses_are_reissued_after_each_replacement() {
    let source = paragraph("alpha beta gamma");
    let mut index = TextIndex::new(&source);
    let strong = index.create_element("strong");
    index.set_text(strong, "BETA");
    index
        .replace_text("beta", &[strong], ReplaceOptions::default())
        .unwrap();

    // the remapped tree addresses the fragments as fresh leaves
    assert_eq!(
        index.get_address_for_text("alpha", MatchOptions::default()),
        Some("0.0".to_string())
    );
    assert_eq!(
        index.get_address_for_text("gamma", MatchOptions::default()),
        Some("0.2".to_string())
    );
    assert_eq!(index.get_text(), "alpha BETA gamma");
}
