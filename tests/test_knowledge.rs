use wumpus_rust::simulation::error::AgentError;
use wumpus_rust::simulation::geometry::{Cell, Orientation};
use wumpus_rust::simulation::knowledge::{Discovery, KnowledgeBase};
use wumpus_rust::simulation::params::HOME;
use wumpus_rust::simulation::percept::{Action, Percept};

/// Steps forward and folds the percept of the new cell in, as the agent does.
fn advance(kb: &mut KnowledgeBase, percept: Percept) -> Discovery {
    kb.apply(Action::MoveForward).unwrap();
    assert_eq!(kb.observe_bump(false), None);
    kb.observe_cell(&percept).unwrap()
}

#[test]
fn test_calm_home_opens_two_safe_cells() {
    let mut kb = KnowledgeBase::new();
    assert_eq!(
        kb.observe_cell(&Percept::quiet()).unwrap(),
        Discovery::New { calm: true }
    );
    let frontier: Vec<Cell> = kb.frontier().collect();
    assert_eq!(frontier, vec![Cell::new(1, 2), Cell::new(2, 1)]);
    assert_eq!(kb.nearest_safe_frontier(), Some(Cell::new(1, 2)));
}

#[test]
fn test_breeze_opens_frontier_without_safety() {
    let mut kb = KnowledgeBase::new();
    let d = kb.observe_cell(&Percept::quiet().with_breeze()).unwrap();
    assert_eq!(d, Discovery::New { calm: false });
    assert!(kb.is_frontier(Cell::new(2, 1)));
    assert!(!kb.is_known_safe(Cell::new(2, 1)));
    assert_eq!(kb.nearest_safe_frontier(), None);
    assert_eq!(kb.nearest_frontier(), Some(Cell::new(1, 2)));
    assert_eq!(kb.stench_cells().count(), 0);
}

#[test]
fn test_only_calm_percepts_open_safe_cells() {
    for percept in [
        Percept::quiet(),
        Percept::quiet().with_glitter(),
        Percept::quiet().with_stench(),
        Percept::quiet().with_breeze(),
        Percept::quiet().with_stench().with_breeze(),
    ] {
        let mut kb = KnowledgeBase::new();
        let d = kb.observe_cell(&percept).unwrap();
        assert_eq!(d, Discovery::New { calm: percept.is_calm() });
        assert_eq!(kb.is_known_safe(Cell::new(2, 1)), percept.is_calm());
        assert_eq!(kb.is_known_safe(Cell::new(1, 2)), percept.is_calm());
    }
}

#[test]
fn test_visited_and_safe_only_grow() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet()).unwrap();
    let mut last_visited = kb.visited().count();
    let mut last_safe = kb.known_safe().count();
    for percept in [Percept::quiet(), Percept::quiet().with_stench()] {
        advance(&mut kb, percept);
        assert!(kb.visited().count() > last_visited);
        assert!(kb.known_safe().count() >= last_safe);
        last_visited = kb.visited().count();
        last_safe = kb.known_safe().count();
        kb.validate().unwrap();
    }
    assert_eq!(kb.pose().location, Cell::new(3, 1));
    assert_eq!(kb.stench_cells().collect::<Vec<_>>(), vec![Cell::new(3, 1)]);
}

#[test]
fn test_bump_is_applied_once() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet()).unwrap();
    advance(&mut kb, Percept::quiet());
    advance(&mut kb, Percept::quiet());
    assert!(kb.is_frontier(Cell::new(4, 1)));

    kb.apply(Action::MoveForward).unwrap();
    assert_eq!(kb.observe_bump(true), Some(Cell::new(4, 1)));
    assert_eq!(kb.pose().location, Cell::new(3, 1));
    assert_eq!(kb.bounds().size(), 3);
    assert!(!kb.is_frontier(Cell::new(4, 1)));

    assert_eq!(kb.observe_bump(true), None);
    assert_eq!(kb.pose().location, Cell::new(3, 1));
    assert_eq!(kb.bounds().size(), 3);
    assert_eq!(
        kb.observe_cell(&Percept::quiet().with_bump()).unwrap(),
        Discovery::Known
    );
    kb.validate().unwrap();
}

#[test]
fn test_death_cell_becomes_fatal() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet().with_breeze()).unwrap();
    kb.apply(Action::MoveForward).unwrap();

    assert_eq!(kb.initialize(), Some(Cell::new(2, 1)));
    assert!(kb.is_fatal(Cell::new(2, 1)));
    assert!(!kb.is_frontier(Cell::new(2, 1)));
    assert!(!kb.is_visited(Cell::new(2, 1)));
    assert_eq!(kb.pose().location, HOME);
    assert_eq!(kb.pose().orientation, Orientation::Right);
    assert_eq!(kb.nearest_frontier(), Some(Cell::new(1, 2)));
    kb.validate().unwrap();

    // A life that ends at home is not a death.
    assert_eq!(kb.initialize(), None);
}

#[test]
fn test_stench_on_hazard_cell_is_explained() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet()).unwrap();
    kb.set_hazard(Cell::new(2, 1));

    let d = advance(&mut kb, Percept::quiet().with_stench());
    assert_eq!(d, Discovery::New { calm: true });
    assert!(kb.is_known_safe(Cell::new(3, 1)));
    assert!(kb.is_known_safe(Cell::new(2, 2)));
    assert_eq!(kb.stench_cells().count(), 0);
    kb.validate().unwrap();
}

#[test]
fn test_stench_beside_hazard_is_still_a_clue() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet()).unwrap();
    kb.set_hazard(Cell::new(2, 2));

    let d = advance(&mut kb, Percept::quiet().with_stench());
    assert_eq!(d, Discovery::New { calm: false });
    assert!(!kb.is_known_safe(Cell::new(3, 1)));
    assert!(!kb.is_known_safe(Cell::new(2, 2)));
    assert_eq!(kb.stench_cells().collect::<Vec<_>>(), vec![Cell::new(2, 1)]);
    kb.validate().unwrap();
}

#[test]
fn test_breeze_on_hazard_cell_blocks_safety() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet()).unwrap();
    kb.set_hazard(Cell::new(2, 1));

    let d = advance(&mut kb, Percept::quiet().with_stench().with_breeze());
    assert_eq!(d, Discovery::New { calm: false });
    assert!(!kb.is_known_safe(Cell::new(3, 1)));
    assert_eq!(kb.stench_cells().count(), 0);
}

#[test]
fn test_hazard_is_fixed_once_set() {
    let mut kb = KnowledgeBase::new();
    kb.set_hazard(Cell::new(2, 2));
    kb.set_hazard(Cell::new(3, 3));
    assert_eq!(kb.hazard(), Some(Cell::new(2, 2)));
}

#[test]
fn test_target_survives_new_life() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet().with_glitter()).unwrap();
    kb.observe_target();
    assert!(kb.has_target());
    assert_eq!(kb.target(), Some(HOME));

    kb.initialize();
    assert!(!kb.has_target());
    assert_eq!(kb.target(), Some(HOME));
}

#[test]
fn test_episode_flags_reset_per_life() {
    let mut kb = KnowledgeBase::new();
    kb.apply(Action::Shoot).unwrap();
    kb.observe_scream(true);
    assert!(!kb.has_arrow());
    assert!(!kb.hazard_alive());

    kb.initialize();
    assert!(kb.has_arrow());
    assert!(kb.hazard_alive());
}

#[test]
fn test_route_is_consumed_in_order() {
    let mut kb = KnowledgeBase::new();
    kb.observe_cell(&Percept::quiet()).unwrap();
    kb.set_plan(vec![Action::TurnLeft, Action::MoveForward]).unwrap();
    assert_eq!(kb.planned_len(), 2);
    assert_eq!(kb.pop_planned().unwrap(), Action::TurnLeft);
    assert_eq!(kb.pop_planned().unwrap(), Action::MoveForward);
    assert_eq!(kb.pose().location, Cell::new(1, 2));
    assert!(matches!(
        kb.pop_planned(),
        Err(AgentError::InconsistentKnowledge(_))
    ));
}
