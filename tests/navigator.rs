//! Tests for the runtime navigator.
mod common;
use common::*;
use parley::navigator::OptionKind;
use parley::prelude::*;

#[test]
fn test_initial_state_is_root_with_empty_history() {
    let cleaned = validate(&create_rich_flow()).unwrap();
    let navigator = Navigator::new(&cleaned);
    assert_eq!(navigator.state(), &NavState::default());
    assert_eq!(navigator.current_id(), "root");
    assert!(navigator.history().is_empty());
}

#[test]
fn test_select_and_back_scenario() {
    let cleaned = validate(&create_scenario_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);

    let transition = navigator.select_label("Start").unwrap();
    assert_eq!(
        transition,
        Transition::Moved {
            from: "root".to_string(),
            to: "faq".to_string()
        }
    );
    assert_eq!(navigator.current_id(), "faq");
    assert_eq!(navigator.history(), ["root".to_string()]);

    assert!(navigator.back());
    assert_eq!(navigator.current_id(), "root");
    assert!(navigator.history().is_empty());
}

#[test]
fn test_back_on_empty_history_is_a_noop() {
    let cleaned = validate(&create_scenario_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);
    assert!(!navigator.back());
    assert_eq!(navigator.state(), &NavState::default());
}

#[test]
fn test_n_backs_undo_n_moves_through_cycles() {
    let cleaned = validate(&create_rich_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);

    // root -> courses -> fees -> courses -> fees -> courses -> root
    let path = [0, 0, 0, 0, 0, 1];
    for index in path {
        navigator.select(index).unwrap();
    }
    assert_eq!(navigator.current_id(), "root");
    assert_eq!(navigator.history().len(), path.len());

    for _ in 0..path.len() {
        assert!(navigator.back());
    }
    assert_eq!(navigator.current_id(), "root");
    assert!(navigator.history().is_empty());
}

#[test]
fn test_reset_from_anywhere() {
    let cleaned = validate(&create_rich_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);
    navigator.select(0).unwrap();
    navigator.select(0).unwrap();
    assert_eq!(navigator.current_id(), "fees");

    navigator.reset();
    assert_eq!(navigator.state(), &NavState::default());
}

#[test]
fn test_sentinels_emit_effects_without_moving() {
    let cleaned = validate(&create_rich_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);
    navigator.select(0).unwrap();
    navigator.select(1).unwrap();
    let before = navigator.state().clone();

    // Back at root via "Home": select the sentinels there.
    assert_eq!(navigator.current_id(), "root");
    assert_eq!(
        navigator.select(1).unwrap(),
        Transition::Effect(Effect::OpenWhatsApp)
    );
    assert_eq!(
        navigator.select_label("Blog").unwrap(),
        Transition::Effect(Effect::Navigate {
            path: "/blog".to_string()
        })
    );
    assert_eq!(navigator.state(), &before);
}

#[test]
fn test_dangling_target_is_refused_without_moving() {
    let cleaned = validate(&create_rich_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);

    let err = navigator.select(3).unwrap_err();
    assert_eq!(
        err,
        NavigationError::StepNotFound {
            from: "root".to_string(),
            target: "archived".to_string()
        }
    );
    assert_eq!(navigator.state(), &NavState::default());
}

#[test]
fn test_follow_checks_unresolved_options_against_the_graph() {
    let cleaned = validate(&create_scenario_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);

    // Built outside any graph, so its target is still unresolved.
    let start = FlowOption::new("Start", "faq");
    assert_eq!(start.target, Target::Dangling("faq".to_string()));

    assert_eq!(
        navigator.follow(&start).unwrap(),
        Transition::Moved {
            from: "root".to_string(),
            to: "faq".to_string()
        }
    );
    assert_eq!(navigator.history(), ["root".to_string()]);

    let err = navigator.follow(&FlowOption::new("Gone", "ghost")).unwrap_err();
    assert_eq!(
        err,
        NavigationError::StepNotFound {
            from: "faq".to_string(),
            target: "ghost".to_string()
        }
    );
    assert_eq!(navigator.current_id(), "faq");
    assert_eq!(navigator.history(), ["root".to_string()]);
}

#[test]
fn test_unknown_option_is_refused() {
    let cleaned = validate(&create_scenario_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);

    assert!(matches!(
        navigator.select(9),
        Err(NavigationError::OptionOutOfRange { index: 9, .. })
    ));
    assert!(matches!(
        navigator.select_label("Nope"),
        Err(NavigationError::LabelNotFound { .. })
    ));
    assert_eq!(navigator.state(), &NavState::default());
}

#[test]
fn test_view_describes_current_step() {
    let cleaned = validate(&create_rich_flow()).unwrap();
    let mut navigator = Navigator::new(&cleaned);

    let view = navigator.view().unwrap();
    assert_eq!(view.id, "root");
    assert!(!view.can_go_back);
    let kinds: Vec<_> = view.options.iter().map(|o| o.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            OptionKind::Step,
            OptionKind::WhatsApp,
            OptionKind::Navigate,
            OptionKind::Unavailable
        ]
    );

    navigator.select(0).unwrap();
    let view = navigator.view().unwrap();
    assert_eq!(view.text, "Pick a programme.");
    assert!(view.can_go_back);
}

#[test]
fn test_navigators_over_one_graph_are_independent() {
    let cleaned = validate(&create_scenario_flow()).unwrap();
    let mut preview = Navigator::new(&cleaned);
    let live = Navigator::new(&cleaned);

    preview.select(0).unwrap();
    assert_eq!(preview.current_id(), "faq");
    assert_eq!(live.current_id(), "root");
}
