//! Action menu tests
//!
//! Pre-filling, URL validation, selectors and the Add/Remove buttons

mod common;

use common::{anchor_count, select, test_model, test_model_with_config, test_model_with_link};

use inline_link::config::ToolConfig;
use inline_link::messages::{MenuMsg, Msg};
use inline_link::model::{MenuAction, ToolPhase};
use inline_link::update::update;

const A_COM: &[(&str, &str)] = &[
    ("href", "https://a.com"),
    ("target", "_blank"),
    ("rel", "nofollow"),
    ("class", "cdx-link"),
];

fn menu(msg: MenuMsg) -> Msg {
    Msg::Menu(msg)
}

// ========================================================================
// Open Tests
// ========================================================================

#[test]
fn test_existing_link_prefills_menu() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));

    assert_eq!(model.menu.input, "https://a.com");
    assert_eq!(model.menu.target, "_blank");
    assert_eq!(model.menu.rel, "nofollow");
    assert!(model.menu.remove_visible);
    assert!(!model.menu.add_visible);
}

#[test]
fn test_existing_link_without_target_uses_defaults() {
    let (mut model, p) = test_model_with_link(&[("href", "https://a.com")]);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));

    assert_eq!(model.menu.input, "https://a.com");
    assert_eq!(model.menu.target, "_self");
    assert_eq!(model.menu.rel, "");
    assert!(model.menu.remove_visible);
}

#[test]
fn test_fresh_selection_uses_configured_defaults() {
    let config = ToolConfig::default()
        .with_default_target("_blank")
        .with_default_relation("noopener");
    let (mut model, p) = test_model_with_config("hello world", config);
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));

    assert_eq!(model.menu.input, "");
    assert_eq!(model.menu.placeholder, "Enter URL");
    assert_eq!(model.menu.target, "_blank");
    assert_eq!(model.menu.rel, "noopener");
    assert!(model.menu.add_visible);
    assert!(!model.menu.remove_visible);
}

#[test]
fn test_selectors_follow_configured_options() {
    let config = ToolConfig::default()
        .with_targets(["_top", "_blank"])
        .with_relations(["nofollow", "", "external"]);
    let (model, _) = test_model_with_config("hello", config);

    assert_eq!(model.menu.targets, vec!["_blank", "_top"]);
    assert_eq!(model.menu.relations, vec!["", "external", "nofollow"]);
}

// ========================================================================
// Validation Tests
// ========================================================================

#[test]
fn test_invalid_url_shows_error_without_mutation() {
    let (mut model, p) = test_model("hello world");
    let before = model.html();
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("not a url"));
    update(&mut model, Msg::submit());

    assert!(model.menu.error_visible);
    assert_eq!(model.phase(), ToolPhase::MenuOpen);
    assert!(model.menu.visible);
    assert_eq!(model.html(), before);
    assert_eq!(model.tool.range, Some(range));
    assert!(!model.tool.is_submitted);
}

#[test]
fn test_empty_url_is_rejected() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::submit());

    assert!(model.menu.error_visible);
    assert_eq!(anchor_count(&model), 0);
}

#[test]
fn test_typing_hides_error() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("bad url"));
    update(&mut model, Msg::submit());
    assert!(model.menu.error_visible);

    update(&mut model, menu(MenuMsg::DeleteWordBackward));
    assert!(!model.menu.error_visible);
    assert_eq!(model.menu.input, "bad ");
}

#[test]
fn test_corrected_url_submits() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("a.co"));
    update(&mut model, menu(MenuMsg::DeleteBackward));
    update(&mut model, Msg::submit());
    assert!(model.menu.error_visible);

    for ch in "om".chars() {
        update(&mut model, menu(MenuMsg::InsertChar(ch)));
    }
    update(&mut model, Msg::submit());

    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert!(model.html().contains(r#"href="http://a.com""#));
}

#[test]
fn test_validation_disabled_accepts_anything() {
    let config = ToolConfig::default().with_validate(false);
    let (mut model, p) = test_model_with_config("hello world", config);
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("not a url"));
    update(&mut model, Msg::submit());

    assert!(!model.menu.error_visible);
    assert_eq!(anchor_count(&model), 1);
}

#[test]
fn test_relative_and_fragment_links_keep_their_form() {
    let config = ToolConfig::default().with_validate(false);
    for href in ["/docs", "#top", "mailto:me@example.com"] {
        let (mut model, p) = test_model_with_config("hello world", config.clone());
        let range = select(&model, p, 0, 5);

        update(&mut model, Msg::surround(range));
        update(&mut model, Msg::set_input(href));
        update(&mut model, Msg::submit());

        assert!(
            model.html().contains(&format!(r#"href="{}""#, href)),
            "{href} should be kept as is: {}",
            model.html()
        );
    }
}

// ========================================================================
// Selector Tests
// ========================================================================

#[test]
fn test_selected_target_and_rel_are_applied() {
    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("https://example.com"));
    update(&mut model, menu(MenuMsg::SelectTarget("_blank".into())));
    update(&mut model, menu(MenuMsg::SelectRelation("noopener".into())));
    update(&mut model, Msg::submit());

    assert_eq!(
        model.html(),
        r#"<p><a href="https://example.com" target="_blank" rel="noopener" class="cdx-link">hello</a> world</p>"#
    );
}

#[test]
fn test_unavailable_selector_values_are_ignored() {
    let config = ToolConfig::default().with_targets(["_blank", "_top"]);
    let (mut model, p) = test_model_with_config("hello world", config);
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, menu(MenuMsg::SelectTarget("_top".into())));
    let cmd = update(&mut model, menu(MenuMsg::SelectTarget("_parent".into())));
    update(&mut model, menu(MenuMsg::SelectRelation("bogus".into())));

    assert!(cmd.is_none());
    assert_eq!(model.menu.target, "_top");
    assert_eq!(model.menu.rel, "");
}

// ========================================================================
// Button Tests
// ========================================================================

#[test]
fn test_editing_existing_link_switches_to_add() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("https://b.com"));
    assert!(model.menu.add_visible);
    assert!(!model.menu.remove_visible);

    // Back to the original values
    update(&mut model, Msg::set_input("https://a.com"));
    assert!(model.menu.remove_visible);
    assert!(!model.menu.add_visible);
}

#[test]
fn test_selector_change_on_existing_link_switches_to_add() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));
    update(&mut model, menu(MenuMsg::SelectTarget("_top".into())));

    assert_eq!(model.menu.primary_action(), Some(MenuAction::Add));
}

#[test]
fn test_hidden_buttons_do_nothing() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);
    let before = model.html();

    update(&mut model, Msg::surround(range));
    // Remove is showing, so Add is inert
    assert!(update(&mut model, Msg::submit()).is_none());
    assert_eq!(model.html(), before);

    update(&mut model, Msg::set_input("https://b.com"));
    // Add is showing now, so Remove is inert
    assert!(update(&mut model, Msg::remove()).is_none());
    assert_eq!(model.html(), before);
    assert_eq!(model.phase(), ToolPhase::MenuOpen);
}

#[test]
fn test_enter_activates_visible_button() {
    let (mut model, p) = test_model_with_link(A_COM);
    let range = select(&model, p, 5, 7);

    update(&mut model, Msg::surround(range));
    update(&mut model, menu(MenuMsg::Confirm));

    assert_eq!(anchor_count(&model), 0);
    assert_eq!(model.phase(), ToolPhase::Inactive);

    let (mut model, p) = test_model("hello world");
    let range = select(&model, p, 0, 5);
    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("example.com"));
    update(&mut model, menu(MenuMsg::Confirm));

    assert_eq!(anchor_count(&model), 1);
}

#[test]
fn test_escape_cancels() {
    let (mut model, p) = test_model("hello world");
    let before = model.html();
    let range = select(&model, p, 0, 5);

    update(&mut model, Msg::surround(range));
    update(&mut model, Msg::set_input("example.com"));
    update(&mut model, menu(MenuMsg::Cancel));

    assert_eq!(model.phase(), ToolPhase::Inactive);
    assert_eq!(model.html(), before);
}

#[test]
fn test_menu_messages_ignored_while_closed() {
    let (mut model, _) = test_model("hello world");

    assert!(update(&mut model, Msg::set_input("x")).is_none());
    assert!(update(&mut model, menu(MenuMsg::Confirm)).is_none());
    assert_eq!(model.menu.input, "");
}
