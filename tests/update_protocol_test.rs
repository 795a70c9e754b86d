//! Update-protocol tests: every slide mutation is expressed as a caller-built
//! whole-array replacement, non-slide fields are replaced wholesale, and
//! concurrent updates never produce a field-level mixture.

use slideforge::models::presentation::{
    AspectRatio, FontSize, PresentationPatch, PresentationSettings,
};
use slideforge::store::MemStore;

mod common;
use common::{new_presentation, slide};

fn slides_patch(slides: Vec<slideforge::models::presentation::Slide>) -> PresentationPatch {
    PresentationPatch {
        slides: Some(slides),
        ..Default::default()
    }
}

#[test]
fn adding_a_slide_preserves_prior_order() {
    let store = MemStore::new();
    let created = store
        .create_presentation(new_presentation("Deck"))
        .expect("create");
    let before = created.slides.clone();

    // Outline-editor add: copy the array, append, submit the whole thing.
    let mut slides = before.clone();
    slides.push(slide("slide-3", "Three"));
    let updated = store
        .update_presentation(created.id, slides_patch(slides))
        .expect("update")
        .expect("exists");

    assert_eq!(updated.slides.len(), before.len() + 1);
    assert_eq!(&updated.slides[..before.len()], &before[..]);
    assert_eq!(updated.slides.last().expect("appended").id, "slide-3");
}

#[test]
fn deleting_a_slide_shifts_later_slides_down() {
    let store = MemStore::new();
    let mut input = new_presentation("Deck");
    input.slides = vec![
        slide("a", "A"),
        slide("b", "B"),
        slide("c", "C"),
        slide("d", "D"),
    ];
    let created = store.create_presentation(input).expect("create");

    let mut slides = created.slides.clone();
    slides.remove(1);
    let updated = store
        .update_presentation(created.id, slides_patch(slides))
        .expect("update")
        .expect("exists");

    // Exactly one element gone, remaining ids unchanged in order.
    let ids: Vec<&str> = updated.slides.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
}

#[test]
fn editing_one_slide_leaves_the_rest_untouched() {
    let store = MemStore::new();
    let created = store
        .create_presentation(new_presentation("Deck"))
        .expect("create");

    let mut slides = created.slides.clone();
    slides[0].title = "Edited".to_string();
    slides[0].bullets.push("an extra bullet".to_string());
    let updated = store
        .update_presentation(created.id, slides_patch(slides))
        .expect("update")
        .expect("exists");

    assert_eq!(updated.slides[0].title, "Edited");
    assert_eq!(updated.slides[1], created.slides[1]);
}

#[test]
fn settings_are_replaced_wholesale_not_key_by_key() {
    let store = MemStore::new();
    let created = store
        .create_presentation(new_presentation("Deck"))
        .expect("create");
    assert!(created.settings.animations);

    // The patch supplies a complete settings object; nothing from the old
    // value bleeds through.
    let replacement = PresentationSettings {
        ratio: AspectRatio::Square,
        font_size: FontSize::Large,
        animations: false,
    };
    let updated = store
        .update_presentation(
            created.id,
            PresentationPatch {
                settings: Some(replacement),
                ..Default::default()
            },
        )
        .expect("update")
        .expect("exists");

    assert_eq!(updated.settings, replacement);
    assert_eq!(updated.slides, created.slides);
}

#[test]
fn reordering_is_an_explicit_array_submission() {
    let store = MemStore::new();
    let created = store
        .create_presentation(new_presentation("Deck"))
        .expect("create");

    let mut slides = created.slides.clone();
    slides.reverse();
    let updated = store
        .update_presentation(created.id, slides_patch(slides.clone()))
        .expect("update")
        .expect("exists");
    assert_eq!(updated.slides, slides);

    // An unrelated patch afterwards preserves the new order verbatim.
    let after = store
        .update_presentation(
            created.id,
            PresentationPatch {
                theme: Some("minimal".to_string()),
                ..Default::default()
            },
        )
        .expect("update")
        .expect("exists");
    assert_eq!(after.slides, slides);
}

#[test]
fn concurrent_updates_from_one_snapshot_never_mix_fields() {
    let store = MemStore::new();
    let created = store
        .create_presentation(new_presentation("Deck"))
        .expect("create");

    // Two callers start from the same snapshot and each submit a full
    // title + slides + theme update. Last writer wins, but the final state
    // must equal one submission entirely, never a mixture.
    let patch_a = PresentationPatch {
        title: Some("Writer A".to_string()),
        slides: Some(vec![slide("a-1", "A one")]),
        theme: Some("dark".to_string()),
        ..Default::default()
    };
    let patch_b = PresentationPatch {
        title: Some("Writer B".to_string()),
        slides: Some(vec![slide("b-1", "B one"), slide("b-2", "B two")]),
        theme: Some("light".to_string()),
        ..Default::default()
    };

    std::thread::scope(|scope| {
        let a = patch_a.clone();
        let b = patch_b.clone();
        let store_ref = &store;
        let id = created.id;
        scope.spawn(move || {
            store_ref.update_presentation(id, a).expect("update a");
        });
        scope.spawn(move || {
            store_ref.update_presentation(id, b).expect("update b");
        });
    });

    let final_state = store
        .get_presentation(created.id)
        .expect("get")
        .expect("exists");

    let matches_a = final_state.title == "Writer A"
        && final_state.slides.len() == 1
        && final_state.theme == "dark";
    let matches_b = final_state.title == "Writer B"
        && final_state.slides.len() == 2
        && final_state.theme == "light";
    assert!(
        matches_a || matches_b,
        "final state mixed fields from both updates: {final_state:?}"
    );
}
