use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wumpus_rust::simulation::agent::{Agent, PlanningAgent};
use wumpus_rust::simulation::environment::WumpusWorld;
use wumpus_rust::simulation::geometry::{Cell, Orientation};
use wumpus_rust::simulation::inference::locate_hazard;
use wumpus_rust::simulation::knowledge::KnowledgeBase;
use wumpus_rust::simulation::percept::{Action, Percept};

fn orientation() -> impl Strategy<Value = Orientation> {
    prop::sample::select(Orientation::all().to_vec())
}

proptest! {
    #[test]
    fn test_orientation_cycle_laws(o in orientation()) {
        prop_assert_eq!(o.turn_right().turn_left(), o);
        prop_assert_eq!(o.turn_left().turn_right(), o);
        prop_assert_eq!(o.turn_right().turn_right().turn_right().turn_right(), o);
        prop_assert_ne!(o.turn_right(), o);
    }

    #[test]
    fn test_step_then_reverse_returns(x in 1..=9i32, y in 1..=9i32, o in orientation()) {
        let c = Cell::new(x, y);
        let back = o.turn_left().turn_left();
        prop_assert_eq!(c.step(o).step(back), c);
        prop_assert!(c.step(o).is_adjacent(c));
    }

    #[test]
    fn test_bump_shrink_is_idempotent(size in 2..=8i32, repeats in 1..4usize) {
        let mut kb = KnowledgeBase::new();
        kb.observe_cell(&Percept::quiet()).unwrap();
        for _ in 1..size {
            kb.apply(Action::MoveForward).unwrap();
            kb.observe_bump(false);
            kb.observe_cell(&Percept::quiet()).unwrap();
        }
        kb.apply(Action::MoveForward).unwrap();
        prop_assert_eq!(kb.observe_bump(true), Some(Cell::new(size + 1, 1)));
        prop_assert_eq!(kb.bounds().size(), size);
        for _ in 0..repeats {
            prop_assert_eq!(kb.observe_bump(true), None);
            prop_assert_eq!(kb.bounds().size(), size);
            prop_assert_eq!(kb.pose().location, Cell::new(size, 1));
        }
        prop_assert!(kb.frontier().all(|c| c.x <= size && c.y <= size));
        kb.validate().unwrap();
    }

    #[test]
    fn test_one_safe_elbow_names_the_other(
        x in 1..=8i32,
        y in 1..=8i32,
        rising in any::<bool>(),
        first_safe in any::<bool>(),
    ) {
        let (a, b) = if rising {
            (Cell::new(x, y), Cell::new(x + 1, y + 1))
        } else {
            (Cell::new(x, y + 1), Cell::new(x + 1, y))
        };
        let e1 = Cell::new(a.x, b.y);
        let e2 = Cell::new(b.x, a.y);
        let (safe, hazard) = if first_safe { (e1, e2) } else { (e2, e1) };
        let d = locate_hazard(&[a, b], |c| c == safe).unwrap();
        prop_assert_eq!(d.hazard, hazard);
        prop_assert!(locate_hazard(&[a, b], |c| c == e1 || c == e2).is_none());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_beliefs_stay_consistent_in_random_worlds(seed in any::<u64>(), size in 2..=6i32) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = WumpusWorld::random(size, &mut rng).unwrap();
        let mut agent = PlanningAgent::new();

        let mut visited: BTreeSet<Cell> = BTreeSet::new();
        for _ in 0..3 {
            world.reset();
            agent.initialize();
            let mut safe: BTreeSet<Cell> = agent.knowledge().unwrap().known_safe().collect();
            while !world.is_over() {
                let action = agent.process(&world.percept()).unwrap();
                let kb = agent.knowledge().unwrap();
                kb.validate().unwrap();

                let now_visited: BTreeSet<Cell> = kb.visited().collect();
                let now_safe: BTreeSet<Cell> = kb.known_safe().collect();
                prop_assert!(now_visited.is_superset(&visited));
                prop_assert!(now_safe.is_superset(&safe));
                prop_assert!(kb.frontier().all(|c| !now_visited.contains(&c)));
                let layout = world.layout();
                for c in &now_safe {
                    prop_assert!(!layout.pits.contains(c), "pit {} believed safe", c);
                    prop_assert!(
                        *c != layout.wumpus || kb.is_visited(*c),
                        "unvisited wumpus cell {} believed safe", c
                    );
                }
                if let Some(h) = kb.hazard() {
                    prop_assert_eq!(h, layout.wumpus);
                }
                let here = kb.pose().location;
                if !kb.is_visited(here) {
                    prop_assert!(kb.is_frontier(here) || kb.is_fatal(here));
                }
                visited = now_visited;
                safe = now_safe;

                world.step(action);
            }
        }
    }
}
