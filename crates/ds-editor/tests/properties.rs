//! Property tests: z-order, undo/redo, history cap, lock exemption and
//! duplicate offset over arbitrary operation sequences.

use ds_core::canvas::CanvasSize;
use ds_core::id::ElementId;
use ds_core::model::{Element, ElementType};
use ds_core::patch::ElementPatch;
use ds_editor::history::History;
use ds_editor::input::{Modifiers, RendererEvent};
use ds_editor::store::{DocumentStore, EditOutcome};
use ds_editor::Studio;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    Add(usize, f32, f32),
    Move(usize, f32, f32),
    Delete(usize),
    Duplicate(usize),
    Up(usize),
    Down(usize),
    ToTop(usize),
    ToBottom(usize),
    ToggleLock(usize),
    Rename(usize),
}

fn coord() -> impl Strategy<Value = f32> {
    -500.0f32..500.0
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..ElementType::ALL.len(), coord(), coord()).prop_map(|(k, x, y)| Op::Add(k, x, y)),
        2 => (any::<usize>(), coord(), coord()).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        1 => any::<usize>().prop_map(Op::Delete),
        1 => any::<usize>().prop_map(Op::Duplicate),
        1 => any::<usize>().prop_map(Op::Up),
        1 => any::<usize>().prop_map(Op::Down),
        1 => any::<usize>().prop_map(Op::ToTop),
        1 => any::<usize>().prop_map(Op::ToBottom),
        1 => any::<usize>().prop_map(Op::ToggleLock),
        1 => any::<usize>().prop_map(Op::Rename),
    ]
}

fn pick(elements: &[Element], i: usize) -> Option<ElementId> {
    (!elements.is_empty()).then(|| elements[i % elements.len()].id)
}

fn apply(studio: &mut Studio, op: &Op) {
    match *op {
        Op::Add(k, x, y) => {
            studio.add_element(ElementType::ALL[k], &ElementPatch::position(x, y));
        }
        Op::Move(i, x, y) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.update_element(id, &ElementPatch::position(x, y));
            }
        }
        Op::Delete(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.delete_element(id);
            }
        }
        Op::Duplicate(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.duplicate_element(id);
            }
        }
        Op::Up(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.move_element_up(id);
            }
        }
        Op::Down(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.move_element_down(id);
            }
        }
        Op::ToTop(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.move_element_to_top(id);
            }
        }
        Op::ToBottom(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.move_element_to_bottom(id);
            }
        }
        Op::ToggleLock(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.toggle_lock(id);
            }
        }
        Op::Rename(i) => {
            if let Some(id) = pick(studio.elements(), i) {
                studio.rename_element(id, &format!("layer {}", i % 100));
            }
        }
    }
}

fn fresh_studio() -> Studio {
    let mut studio = Studio::default();
    studio.create_project("Props", CanvasSize::default(), "#FFFFFF".into());
    studio
}

fn id_set(elements: &[Element]) -> BTreeSet<String> {
    elements.iter().map(|e| e.id.as_str().to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn z_order_moves_keep_the_id_set(
        count in 1usize..8,
        moves in prop::collection::vec((0u8..4, any::<usize>()), 0..40),
    ) {
        let mut store = DocumentStore::default();
        for i in 0..count {
            store.add_element(ElementType::Rectangle, &ElementPatch::position(i as f32, 0.0));
        }
        let ids = id_set(store.elements());

        for (kind, i) in moves {
            let id = store.elements()[i % count].id;
            let top = store.elements()[count - 1].id;
            let bottom = store.elements()[0].id;
            let before: Vec<ElementId> = store.elements().iter().map(|e| e.id).collect();
            let moved = match kind {
                0 => store.move_element_up(id),
                1 => store.move_element_down(id),
                2 => store.move_element_to_top(id),
                _ => store.move_element_to_bottom(id),
            };
            let after: Vec<ElementId> = store.elements().iter().map(|e| e.id).collect();

            prop_assert_eq!(id_set(store.elements()), ids.clone());
            prop_assert_eq!(moved, before != after);
            if (kind == 0 || kind == 2) && id == top {
                prop_assert!(!moved);
            }
            if (kind == 1 || kind == 3) && id == bottom {
                prop_assert!(!moved);
            }
        }
    }

    #[test]
    fn undo_n_then_redo_n_restores_the_list(
        ops in prop::collection::vec(op(), 1..30),
        seed in any::<usize>(),
    ) {
        let mut studio = fresh_studio();
        for op in &ops {
            apply(&mut studio, op);
        }
        let before = studio.elements().to_vec();
        let index = studio.history().index().unwrap_or(0);
        let n = seed % (index + 1);

        for _ in 0..n {
            prop_assert!(studio.undo().is_some());
        }
        for _ in 0..n {
            prop_assert!(studio.redo().is_some());
        }
        prop_assert_eq!(studio.elements(), before.as_slice());
        prop_assert!(!studio.can_redo());
    }

    #[test]
    fn new_action_after_undo_discards_redo_branch(
        ops in prop::collection::vec(op(), 1..20),
        seed in any::<usize>(),
    ) {
        let mut studio = fresh_studio();
        for op in &ops {
            apply(&mut studio, op);
        }
        let index = studio.history().index().unwrap_or(0);
        prop_assume!(index > 0);
        let n = 1 + seed % index;
        for _ in 0..n {
            studio.undo();
        }
        prop_assert!(studio.can_redo());

        studio.add_element(ElementType::Circle, &ElementPatch::default());
        prop_assert!(!studio.can_redo());
        prop_assert_eq!(studio.redo(), None);
    }

    #[test]
    fn history_never_exceeds_its_limit(pushes in 0usize..120) {
        let store = DocumentStore::default();
        let mut history = History::default();
        for i in 0..pushes {
            history.push(&format!("step {i}"), store.elements());
        }
        prop_assert_eq!(history.len(), pushes.min(50));
        if pushes > 0 {
            prop_assert_eq!(history.index(), Some(history.len() - 1));
            let oldest = pushes.saturating_sub(50);
            prop_assert_eq!(&history.entries()[0].action, &format!("step {oldest}"));
        }
    }

    #[test]
    fn locked_elements_only_change_visibility_and_lock(
        x in prop::option::of(coord()),
        rotation in prop::option::of(0.0f32..360.0),
        opacity in prop::option::of(0.0f32..1.0),
        fill in prop::option::of("#[0-9A-F]{6}"),
        visible in prop::option::of(any::<bool>()),
        locked in prop::option::of(any::<bool>()),
        drag_to in (coord(), coord()),
    ) {
        let mut studio = fresh_studio();
        let id = studio.add_element(ElementType::Star, &ElementPatch::position(10.0, 20.0));
        studio.toggle_lock(id);
        let original = studio.element(id).unwrap().clone();

        studio.dispatch(&RendererEvent::DragStart { id });
        studio.dispatch(&RendererEvent::DragEnd {
            id,
            x: drag_to.0,
            y: drag_to.1,
            modifiers: Modifiers::default(),
        });
        prop_assert_eq!(studio.element(id).unwrap(), &original);

        let patch = ElementPatch { x, rotation, opacity, fill, visible, locked, ..Default::default() };
        let outcome = studio.update_element(id, &patch);

        let mut after = studio.element(id).unwrap().clone();
        if patch.is_lock_exempt() {
            prop_assert_ne!(outcome, EditOutcome::Locked);
        } else {
            prop_assert_eq!(outcome, EditOutcome::Locked);
            prop_assert_eq!(&after, &original);
        }
        after.base.visible = original.base.visible;
        after.base.locked = original.base.locked;
        prop_assert_eq!(after, original);
    }

    #[test]
    fn duplicate_offsets_by_twenty(x in coord(), y in coord(), k in 0..ElementType::ALL.len()) {
        let mut studio = fresh_studio();
        let id = studio.add_element(ElementType::ALL[k], &ElementPatch::position(x, y));
        let source = studio.element(id).unwrap().clone();

        let clone_id = studio.duplicate_element(id).unwrap();
        let clone = studio.element(clone_id).unwrap();
        prop_assert_ne!(clone_id, id);
        prop_assert_eq!(clone.base.x, source.base.x + 20.0);
        prop_assert_eq!(clone.base.y, source.base.y + 20.0);
        prop_assert_eq!(&clone.kind, &source.kind);
        prop_assert_eq!(studio.element(id).unwrap(), &source);
    }
}

#[test]
fn sixty_pushes_leave_fifty_newest() {
    let mut studio = fresh_studio();
    for i in 0..60 {
        studio.store_mut().add_element(ElementType::Line, &ElementPatch::position(i as f32, 0.0));
        studio.add_to_history(&format!("Add line {i}"));
    }
    let history = studio.history();
    assert_eq!(history.len(), 50);
    assert_eq!(history.index(), Some(49));
    assert_eq!(history.entries()[0].action, "Add line 10");
    assert_eq!(history.current().unwrap().action, "Add line 59");
}
