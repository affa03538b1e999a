//! Committing files into the global index: idempotence, additivity and the
//! component-list subtraction asymmetry.

use std::path::Path;

use scenedex_common::Anchor;
use scenedex_conformance::{build_and_commit, memory_cache, small_scene_index, timestamp, SMALL_SCENE};
use scenedex_index::CacheIndex;

fn anchors(raw: &[u64]) -> Vec<Anchor> {
    raw.iter().copied().map(Anchor::new).collect()
}

/// The fixture with its header repeated once per copy of the body.
fn doubled_scene() -> String {
    let body_start = SMALL_SCENE.find("---").unwrap();
    format!("{SMALL_SCENE}{}", &SMALL_SCENE[body_start..])
}

#[test]
fn recommit_is_idempotent() {
    let mut cache = memory_cache(&[("Small.unity", SMALL_SCENE)], 5000);
    build_and_commit(&mut cache, "Small.unity");
    let once = cache.global().combined().clone();

    build_and_commit(&mut cache, "Small.unity");
    assert_eq!(cache.global().combined(), &once);
    assert_eq!(cache.local_anchor_usages(Anchor::new(1253103)), 3);
    assert_eq!(
        cache.components_for(Anchor::new(1253103)),
        anchors(&[1253104, 1253106, 1253105]).as_slice()
    );
}

#[test]
fn two_files_add_up() {
    let mut cache = memory_cache(&[("A.unity", SMALL_SCENE), ("B.unity", SMALL_SCENE)], 2);
    build_and_commit(&mut cache, "A.unity");
    build_and_commit(&mut cache, "B.unity");

    assert_eq!(cache.global().len(), 2);
    assert_eq!(cache.local_anchor_usages(Anchor::new(1253103)), 6);
    assert_eq!(cache.local_anchor_usages(Anchor::new(11500000)), 4);
    assert_eq!(cache.guid_usages("f70555f144d8491a825f0804e09c671c"), 4);
    assert_eq!(
        cache.components_for(Anchor::new(1253105)),
        anchors(&[1253103, 1253104, 1253107, 1253103, 1253104, 1253107]).as_slice()
    );
}

#[test]
fn concatenated_file_equals_two_committed_copies() {
    let doubled = doubled_scene();
    let mut single = memory_cache(&[("Double.unity", doubled.as_str())], 3);
    let concatenated = build_and_commit(&mut single, "Double.unity");

    let mut expected = CacheIndex::new();
    expected.merge(&small_scene_index());
    expected.merge(&small_scene_index());
    assert_eq!(concatenated, expected);
}

#[test]
fn recommit_after_edit_replaces_contribution() {
    let mut cache = memory_cache(&[("A.unity", SMALL_SCENE), ("B.unity", SMALL_SCENE)], 5000);
    build_and_commit(&mut cache, "A.unity");
    build_and_commit(&mut cache, "B.unity");

    let edited = SMALL_SCENE.replace("guid: bb7e9cca953d340059eb1e053bbbae31", "guid: 0123abcd");
    cache.fs_mut().insert("A.unity", edited, timestamp(2));
    build_and_commit(&mut cache, "A.unity");

    assert_eq!(cache.guid_usages("bb7e9cca953d340059eb1e053bbbae31"), 1);
    assert_eq!(cache.guid_usages("0123abcd"), 1);
    assert_eq!(cache.local_anchor_usages(Anchor::new(1253103)), 6);
}

#[test]
fn forget_subtracts_the_file() {
    let mut cache = memory_cache(&[("A.unity", SMALL_SCENE), ("B.unity", SMALL_SCENE)], 5000);
    build_and_commit(&mut cache, "A.unity");
    build_and_commit(&mut cache, "B.unity");

    let removed = cache.forget(Path::new("B.unity")).unwrap();
    assert_eq!(removed, small_scene_index());
    assert_eq!(cache.local_anchor_usages(Anchor::new(1253103)), 3);
    assert_eq!(cache.guid_usages("aba4101f7625143f49d0968febe1a1b4"), 1);
    assert_eq!(cache.global().len(), 1);
}

#[test]
fn recommit_drops_other_files_component_lists() {
    // Counts subtract exactly, but a subtracted anchor loses its whole
    // combined component list, including entries other files contributed.
    let mut cache = memory_cache(&[("A.unity", SMALL_SCENE), ("B.unity", SMALL_SCENE)], 5000);
    build_and_commit(&mut cache, "A.unity");
    build_and_commit(&mut cache, "B.unity");
    build_and_commit(&mut cache, "A.unity");

    assert_eq!(cache.local_anchor_usages(Anchor::new(1253103)), 6);
    assert_eq!(
        cache.components_for(Anchor::new(1253103)),
        anchors(&[1253104, 1253106, 1253105]).as_slice()
    );
    // B's own index still holds its list.
    let b = cache.global().file_index(Path::new("B.unity")).unwrap();
    assert_eq!(b.attached_components(Anchor::new(1253103)).len(), 3);
}
