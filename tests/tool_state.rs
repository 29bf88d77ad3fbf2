//! Tool state machine tests
//!
//! Toggling, selection tracking, toolbar teardown and applied submissions

mod common;

use common::{anchor_count, select, test_model, test_model_with_link, text};

use inline_link::commands::Cmd;
use inline_link::messages::{HostMsg, MenuMsg, Msg, ToolMsg};
use inline_link::model::{ToolPhase, ToolState};
use inline_link::update::update;

const A_COM: &[(&str, &str)] = &[
    ("href", "https://a.com"),
    ("target", "_blank"),
    ("rel", "nofollow"),
    ("class", "cdx-link"),
];

// ========================================================================
// Toggle Tests
// ========================================================================

#[test]
fn test_new_model_is_inactive() {
    let (model, _) = test_model("hello world");
    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert!(!model.menu.visible);
    assert!(!model.menu.handlers_attached);
    assert_eq!(model.tool, ToolState::default());
}

#[test]
fn test_surround_opens_menu_and_captures_range() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 6, 11);

    let cmd = update(&mut model, Msg::surround(range));

    assert_eq!(model.phase(), ToolPhase::MenuOpen);
    assert_eq!(model.tool.range, Some(range));
    assert!(model.menu.visible);
    assert!(model.menu.add_visible);
    assert!(!model.menu.remove_visible);
    assert_eq!(model.menu.input, "");
    assert!(cmd.unwrap().contains(&Cmd::FocusInput));
}

#[test]
fn test_surround_without_selection_is_ignored() {
    let (mut model, _) = test_model("hello world");

    let cmd = update(&mut model, Msg::Tool(ToolMsg::Surround(None)));

    assert!(cmd.is_none());
    assert_eq!(model.phase(), ToolPhase::Inactive);
}

#[test]
fn test_toggle_twice_returns_to_inactive_without_mutation() {
    let (mut model, p) = test_model("hello world");
    let before = model.html();
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::surround(range));

    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert_eq!(model.tool, ToolState::default());
    assert!(!model.menu.visible);
    assert_eq!(model.html(), before);
}

#[test]
fn test_toggle_off_discards_typed_url() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("https://example.com"));
    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::surround(range));

    assert_eq!(model.menu.input, "");
    assert_eq!(anchor_count(&model), 0);
}

#[test]
fn test_toggle_off_restores_selection() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::Host(HostMsg::SelectionChanged(None)));
    update(&mut model, Msg::surround(range));

    assert_eq!(model.selection.range(), Some(range));
}

// ========================================================================
// Submission Tests
// ========================================================================

#[test]
fn test_submit_wraps_selection_and_resets() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 6, 11);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("https://example.com"));
    let cmd = update(&mut model, Msg::submit());

    assert_eq!(
        model.html(),
        r#"<p>hello <a href="https://example.com" target="_self" rel="" class="cdx-link">world</a></p>"#
    );
    assert!(cmd.unwrap().contains(&Cmd::CloseToolbar));
    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert_eq!(model.tool, ToolState::default());
    assert!(!model.menu.visible);
    assert!(model.diagnostics.is_empty());
}

#[test]
fn test_submit_selects_new_link_contents() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 6, 11);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("example.com"));
    update(&mut model, Msg::submit());

    let handle = model.find_annotation().expect("selection inside new link");
    assert_eq!(handle.attributes(&model.document).href, "http://example.com");
    let selected = model.selection.range().unwrap().text(&model.document);
    assert_eq!(selected, "world");
}

#[test]
fn test_remove_unwraps_link() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));
    assert!(model.menu.remove_visible);
    let cmd = update(&mut model, Msg::remove());

    assert_eq!(model.html(), "<p>see a.com now</p>");
    assert!(cmd.unwrap().contains(&Cmd::CloseToolbar));
    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert_eq!(model.tool, ToolState::default());
}

#[test]
fn test_remove_restores_selection_over_unlinked_text() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::remove());

    let selected = model.selection.range().unwrap().text(&model.document);
    assert_eq!(selected, "a.com");
}

#[test]
fn test_submissions_never_change_text() {
    let (mut model, p) = test_model("one two three");
    let original = text(&model);

    for (start, end, url) in [(0, 3, "a.com"), (4, 7, "b.com"), (1, 9, "c.com")] {
        let range = select(&model, p, start, end);
        update(&mut model, Msg::surround(range));
        update(&mut model, Msg::set_input(url));
        update(&mut model, Msg::submit());
        assert_eq!(text(&model), original);
    }
}

// ========================================================================
// Check State Tests
// ========================================================================

#[test]
fn test_selection_inside_link_opens_prefilled_menu() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::Host(HostMsg::SelectionChanged(Some(range))));

    assert_eq!(model.phase(), ToolPhase::MenuOpen);
    assert!(model.menu.is_existing_link());
    assert_eq!(model.menu.input, "https://a.com");
}

#[test]
fn test_selection_leaving_link_closes_menu() {
    let (mut model, p) = test_model_with_link(A_COM);
    let inside = select(&model, p, 5, 7);
    let outside = select(&model, p, 0, 3);

    update(&mut model, Msg::Host(HostMsg::SelectionChanged(Some(inside))));
    update(&mut model, Msg::Host(HostMsg::SelectionChanged(Some(outside))));

    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert!(!model.menu.visible);
}

#[test]
fn test_selection_change_keeps_add_menu_open() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::Host(HostMsg::SelectionChanged(None)));

    assert_eq!(model.phase(), ToolPhase::MenuOpen);
    assert_eq!(model.tool.range, Some(range));
}

#[test]
fn test_check_state_is_stable_inside_same_link() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::Menu(MenuMsg::SelectRelation("author".into())));
    update(&mut model, Msg::Tool(ToolMsg::CheckState));

    // Same selection: the user's edit survives
    assert_eq!(model.menu.rel, "author");
}

// ========================================================================
// Clear Tests
// ========================================================================

#[test]
fn test_clear_closes_menu_and_detaches_handlers() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::Tool(ToolMsg::Clear));

    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert!(!model.menu.handlers_attached);

    // Button messages are dead after teardown
    assert!(update(&mut model, Msg::submit()).is_none());
    assert!(update(&mut model, Msg::remove()).is_none());
    assert_eq!(anchor_count(&model), 0);
}

#[test]
fn test_clear_twice_is_harmless() {
    let (mut model, _) = test_model("hello world");

    update(&mut model, Msg::Tool(ToolMsg::Clear));
    update(&mut model, Msg::Tool(ToolMsg::Clear));

    assert_eq!(model.phase(), ToolPhase::Inactive);
}
