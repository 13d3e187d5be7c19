use super::*;
use pretty_assertions::assert_eq;

#[test]
fn close_flips_exactly_one_story_to_closed() {
    let mut state = state();
    let first = add_story(&mut state);
    let second = add_story(&mut state);

    let effects = user(&mut state, UserAction::CloseStory(first));

    assert_eq!(
        effects,
        vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
    );
    assert_eq!(state.stories[0].status, StoryStatus::Closed);
    assert_eq!(state.stories[1].status, StoryStatus::Open);
    assert_eq!(state.stories[1].id, second);
}

#[test]
fn closed_is_terminal() {
    let mut state = state();
    let id = add_story(&mut state);
    user(&mut state, UserAction::CloseStory(id));

    let before = state.stories.clone();
    user(&mut state, UserAction::CloseStory(id));

    assert_eq!(state.stories, before);
}

#[test]
fn close_of_unknown_id_leaves_the_list_unchanged() {
    let mut state = state();
    add_story(&mut state);
    let before = state.stories.clone();

    user(&mut state, UserAction::CloseStory(StoryId(999)));

    assert_eq!(state.stories, before);
}

#[test]
fn delete_removes_exactly_one_matching_story() {
    let mut state = state();
    let first = add_story(&mut state);
    let second = add_story(&mut state);

    let effects = user(&mut state, UserAction::DeleteStory(first));

    assert_eq!(
        effects,
        vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
    );
    assert_eq!(state.stories.len(), 1);
    assert_eq!(state.stories[0].id, second);
}

#[test]
fn repeated_delete_is_a_no_op() {
    let mut state = state();
    let id = add_story(&mut state);

    user(&mut state, UserAction::DeleteStory(id));
    assert!(state.stories.is_empty());

    user(&mut state, UserAction::DeleteStory(id));
    assert!(state.stories.is_empty());
}

#[test]
fn list_keeps_insertion_order() {
    let mut state = state();
    let ids: Vec<StoryId> = (0..4).map(|_| add_story(&mut state)).collect();

    let listed: Vec<StoryId> = state.stories.iter().map(|story| story.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn ids_are_never_reused_after_deletion() {
    let mut state = state();
    let first = add_story(&mut state);
    let second = add_story(&mut state);
    user(&mut state, UserAction::DeleteStory(second));

    let third = add_story(&mut state);

    assert!(third > second);
    assert!(third > first);
}

#[test]
fn hydration_restores_the_board_and_id_counter() {
    let mut donor = state();
    add_story(&mut donor);
    add_story(&mut donor);
    let stories = donor.stories.clone();

    let mut state = state();
    run_runtime(
        &mut state,
        RuntimeAction::HydrateBoard {
            stories: stories.clone(),
            next_story_id: 3,
        },
    );

    assert_eq!(state.stories, stories);
    assert_eq!(state.next_story_id, 3);
}

#[test]
fn hydration_repairs_a_stale_id_counter() {
    let mut donor = state();
    let last = add_story(&mut donor);

    let mut state = state();
    run_runtime(
        &mut state,
        RuntimeAction::HydrateBoard {
            stories: donor.stories.clone(),
            next_story_id: 1,
        },
    );

    let fresh = add_story(&mut state);
    assert!(fresh > last);
}
