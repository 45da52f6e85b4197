use super::*;
use crate::shapes::Shape;
use crate::topology::{PolytopeDescriptor, TopologyCfg};
use std::cell::RefCell;
use std::rc::Rc;

fn descriptor(shape: Shape) -> PolytopeDescriptor {
    shape.derive(&TopologyCfg::default()).unwrap()
}

/// Smallest vertex subset whose clicks turn every ring off.
fn minimal_solution(d: &PolytopeDescriptor, states: &[bool]) -> Vec<usize> {
    let n = d.vertex_count();
    assert!(n <= 16, "brute force only for small shapes");
    let mut best: Option<Vec<usize>> = None;
    for mask in 0u32..(1 << n) {
        let mut s = states.to_vec();
        for v in (0..n).filter(|v| mask & (1 << v) != 0) {
            for &r in d.vertex_rings(v) {
                s[r] = !s[r];
            }
        }
        if s.iter().all(|&on| !on)
            && best
                .as_ref()
                .map_or(true, |b| (mask.count_ones() as usize) < b.len())
        {
            best = Some((0..n).filter(|v| mask & (1 << v) != 0).collect());
        }
    }
    best.expect("scrambles are reachable and therefore solvable")
}

#[test]
fn starts_cleared_in_exploration() {
    let d = descriptor(Shape::Cell24);
    let p = PuzzleState::new(&d, ScrambleCfg::default(), 1);
    assert_eq!(p.ring_states(), vec![false; 16].as_slice());
    assert_eq!(p.move_count(), 0);
    assert_eq!(p.mode(), Mode::Exploration);
    assert!(!p.has_won());
    assert_eq!(p.vertex_count(), 24);
}

#[test]
fn click_flips_exactly_the_incident_rings() {
    let d = descriptor(Shape::Cell600);
    let mut p = PuzzleState::new(&d, ScrambleCfg::default(), 1);
    p.click_vertex(17);
    assert_eq!(p.board().lit_count(), 6);
    for (r, &on) in p.ring_states().iter().enumerate() {
        assert_eq!(on, d.vertex_rings(17).contains(&r));
    }
    p.click_vertex(17);
    assert!(p.board().all_off());
    assert_eq!(p.move_count(), 2);
}

#[test]
fn every_click_lights_the_same_number_of_rings() {
    for shape in Shape::ALL {
        let d = descriptor(shape);
        let mut p = PuzzleState::new(&d, ScrambleCfg::default(), 0);
        for v in 0..d.vertex_count() {
            p.reset();
            p.click_vertex(v);
            assert_eq!(
                p.board().lit_count(),
                d.rings_per_vertex(),
                "{shape}: vertex {v}"
            );
        }
    }
}

#[test]
fn scrambles_are_never_uniform() {
    for shape in Shape::ALL {
        let d = descriptor(shape);
        let mut p = PuzzleState::new(&d, ScrambleCfg::default(), 7);
        for _ in 0..40 {
            let report = p.scramble();
            assert!(!report.fallback);
            assert!(report.attempts >= 1);
            let b = p.board();
            assert!(!b.all_off() && !b.all_on(), "{shape}: uniform scramble");
            assert_eq!(b.mode(), Mode::Challenge);
            assert_eq!(b.move_count(), 0);
            assert!(!b.has_won());
        }
    }
}

#[test]
fn same_seed_same_scramble() {
    let d = descriptor(Shape::Cell24);
    let mut a = PuzzleState::new(&d, ScrambleCfg::default(), 42);
    let mut b = PuzzleState::new(&d, ScrambleCfg::default(), 42);
    a.scramble();
    b.scramble();
    assert_eq!(a.ring_states(), b.ring_states());
}

#[test]
fn exhausted_attempts_fall_back_to_vertex_zero() {
    let d = descriptor(Shape::Cell24);
    let mut p = PuzzleState::new(&d, ScrambleCfg { max_attempts: 0 }, 3);
    let report = p.scramble();
    assert_eq!(
        report,
        ScrambleReport {
            attempts: 0,
            fallback: true
        }
    );
    assert_eq!(p.board().lit_count(), 4);
    for &r in d.vertex_rings(0) {
        assert!(p.ring_states()[r]);
    }
    assert_eq!(p.mode(), Mode::Challenge);
}

#[test]
fn reset_clears_everything_and_notifies_once() {
    let d = descriptor(Shape::Cell16);
    let mut p = PuzzleState::new(&d, ScrambleCfg::default(), 5);
    p.scramble();
    p.click_vertex(2);
    let seen = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        p.subscribe_change(move |b: &Board| seen.borrow_mut().push(b.clone()));
    }
    p.reset();
    assert_eq!(seen.borrow().len(), 1);
    let b = &seen.borrow()[0];
    assert!(b.all_off());
    assert_eq!(b.move_count(), 0);
    assert_eq!(b.mode(), Mode::Exploration);
    assert!(!b.has_won());
}

#[test]
fn exploration_never_wins() {
    let d = descriptor(Shape::Cell16);
    let mut p = PuzzleState::new(&d, ScrambleCfg::default(), 5);
    let wins = Rc::new(RefCell::new(0));
    {
        let wins = Rc::clone(&wins);
        p.subscribe_win(move |_| *wins.borrow_mut() += 1);
    }
    p.click_vertex(0);
    p.click_vertex(0);
    assert!(p.board().all_off());
    assert_eq!(*wins.borrow(), 0);
    assert!(!p.has_won());
}

#[test]
fn solving_a_scramble_wins_once_after_the_change() {
    let d = descriptor(Shape::Cell16);
    for seed in 0..10 {
        let mut p = PuzzleState::new(&d, ScrambleCfg::default(), seed);
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            p.subscribe_change(move |b: &Board| {
                log.borrow_mut().push(format!("change {}", b.has_won()))
            });
        }
        {
            let log = Rc::clone(&log);
            p.subscribe_win(move |w: &WinEvent| {
                log.borrow_mut().push(format!("win {:?} {}", w.kind, w.moves))
            });
        }
        p.scramble();
        let clicks = minimal_solution(&d, p.ring_states());
        log.borrow_mut().clear();
        for &v in &clicks {
            p.click_vertex(v);
        }
        let n = clicks.len();
        let log_now = log.borrow().clone();
        assert_eq!(log_now.len(), n + 1, "seed {seed}: {log_now:?}");
        assert!(log_now[..n - 1].iter().all(|e| e == "change false"));
        assert_eq!(log_now[n - 1], "change true");
        assert_eq!(log_now[n], format!("win RingsOff {n}"));
        assert!(p.has_won());

        // Further clicks keep counting but never win again.
        p.click_vertex(0);
        p.click_vertex(0);
        assert!(p.board().all_off());
        assert_eq!(p.move_count(), n as u32 + 2);
        assert_eq!(log.borrow().iter().filter(|e| e.starts_with("win")).count(), 1);
    }
}

#[test]
fn all_on_is_a_win_too() {
    // Two independent rings: a scramble lights exactly one of them.
    let mut p = PuzzleState::from_incidence(vec![vec![0], vec![1]], 2, ScrambleCfg::default(), 9);
    let won = Rc::new(RefCell::new(None));
    {
        let won = Rc::clone(&won);
        p.subscribe_win(move |w: &WinEvent| *won.borrow_mut() = Some(*w));
    }
    p.scramble();
    let dark = p.ring_states().iter().position(|&on| !on).unwrap();
    p.click_vertex(dark);
    assert_eq!(
        *won.borrow(),
        Some(WinEvent {
            kind: WinKind::RingsOn,
            moves: 1
        })
    );
}

#[test]
fn new_scramble_rearms_the_win() {
    let mut p = PuzzleState::from_incidence(vec![vec![0], vec![1]], 2, ScrambleCfg::default(), 4);
    let wins = Rc::new(RefCell::new(0));
    {
        let wins = Rc::clone(&wins);
        p.subscribe_win(move |_| *wins.borrow_mut() += 1);
    }
    for _ in 0..3 {
        p.scramble();
        let lit = p.ring_states().iter().position(|&on| on).unwrap();
        p.click_vertex(lit);
    }
    assert_eq!(*wins.borrow(), 3);
}

#[test]
fn unsubscribed_listeners_stay_silent() {
    let d = descriptor(Shape::Cell16);
    let mut p = PuzzleState::new(&d, ScrambleCfg::default(), 0);
    let hits = Rc::new(RefCell::new(0));
    let id = {
        let hits = Rc::clone(&hits);
        p.subscribe_change(move |_| *hits.borrow_mut() += 1)
    };
    p.click_vertex(1);
    assert!(p.unsubscribe_change(id));
    p.click_vertex(1);
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn rebind_switches_shape_and_resets() {
    let small = descriptor(Shape::Cell16);
    let big = descriptor(Shape::Cell24);
    let mut p = PuzzleState::new(&small, ScrambleCfg::default(), 0);
    p.scramble();
    let seen = Rc::new(RefCell::new(0usize));
    {
        let seen = Rc::clone(&seen);
        p.subscribe_change(move |b: &Board| *seen.borrow_mut() = b.ring_states().len());
    }
    p.rebind(&big);
    assert_eq!(*seen.borrow(), 16);
    assert_eq!(p.vertex_count(), 24);
    assert_eq!(p.mode(), Mode::Exploration);
    p.click_vertex(23);
    assert_eq!(p.board().lit_count(), 4);
}

#[test]
#[should_panic(expected = "out of range")]
fn clicking_a_missing_vertex_panics() {
    let d = descriptor(Shape::Cell16);
    let mut p = PuzzleState::new(&d, ScrambleCfg::default(), 0);
    p.click_vertex(8);
}

#[test]
#[should_panic(expected = "toggles every ring")]
fn incidence_covering_all_rings_is_rejected() {
    PuzzleState::from_incidence(vec![vec![0, 1]], 2, ScrambleCfg::default(), 0);
}

#[test]
#[should_panic(expected = "repeats a ring")]
fn incidence_with_repeated_ring_is_rejected() {
    PuzzleState::from_incidence(
        vec![vec![0, 0], vec![1], vec![2]],
        3,
        ScrambleCfg { max_attempts: 0 },
        1,
    );
}
