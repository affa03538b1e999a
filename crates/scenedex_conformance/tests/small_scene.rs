//! Reference counts extracted from the fixture scene.

use scenedex_common::Anchor;
use scenedex_conformance::{small_scene_index, SMALL_SCENE};

fn anchors(raw: &[u64]) -> Vec<Anchor> {
    raw.iter().copied().map(Anchor::new).collect()
}

#[test]
fn local_anchor_usages() {
    let index = small_scene_index();
    let expected = [
        (1253103, 3),
        (1253104, 2),
        (1253105, 1),
        (1253106, 1),
        (1253107, 1),
        (310984660, 1),
        (11500000, 2),
        (2100000, 1),
        (11400000, 1),
        (10907, 1),
    ];
    for (anchor, usages) in expected {
        assert_eq!(
            index.anchor_usages(Anchor::new(anchor)),
            usages,
            "usages of {anchor}"
        );
    }
    assert_eq!(index.anchor_count(), expected.len());
}

#[test]
fn null_references_are_not_counted() {
    let index = small_scene_index();
    assert_eq!(index.anchor_usages(Anchor::NONE), 0);
    assert!(index.anchors().all(|(anchor, _)| !anchor.is_none()));
}

#[test]
fn guid_usages() {
    let index = small_scene_index();
    assert_eq!(index.guid_usages("f70555f144d8491a825f0804e09c671c"), 2);
    assert_eq!(index.guid_usages("bb7e9cca953d340059eb1e053bbbae31"), 1);
    assert_eq!(index.guid_usages("aba4101f7625143f49d0968febe1a1b4"), 1);
    assert_eq!(index.guid_usages("00000000000000000000000000000000"), 0);
    assert_eq!(index.guid_count(), 4);
}

#[test]
fn exponent_shaped_guid_keeps_its_text() {
    let index = small_scene_index();
    assert_eq!(index.guid_usages("0000000000000000e000000000000000"), 1);
    assert_eq!(index.guid_usages("0.0"), 0);
}

#[test]
fn attached_components_keep_document_order() {
    let index = small_scene_index();
    assert_eq!(
        index.attached_components(Anchor::new(1253103)),
        anchors(&[1253104, 1253106, 1253105]).as_slice()
    );
    assert_eq!(
        index.attached_components(Anchor::new(1253105)),
        anchors(&[1253103, 1253104, 1253107]).as_slice()
    );
    assert!(index.attached_components(Anchor::new(1253104)).is_empty());
}

#[test]
fn stripped_document_is_indexed() {
    // The only reference to 11400000 lives in the `stripped` document.
    assert!(SMALL_SCENE.contains("&1253107 stripped"));
    let index = small_scene_index();
    assert_eq!(index.anchor_usages(Anchor::new(11400000)), 1);
}

#[test]
fn reference_total() {
    let index = small_scene_index();
    // 14 fileID references plus 5 guid references.
    assert_eq!(index.reference_count(), 19);
}
