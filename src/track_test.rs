use crate::avl::Avl;
use crate::entry::Key;
use crate::obstacle::{Obstacle, ObstacleKind, DEFAULT_SIZE};
use crate::track::Viewport;

fn track() -> Avl<Obstacle> {
    let mut avl: Avl<Obstacle> = Avl::new("test-track");
    let kinds = ObstacleKind::ALL;
    for (i, x) in (0..40).map(|i| i * 100).enumerate() {
        let kind = kinds[i % kinds.len()];
        assert!(avl.place(x, (i % 6) as i64, kind, DEFAULT_SIZE, DEFAULT_SIZE));
    }
    avl
}

#[test]
fn test_viewport() {
    let viewport = Viewport::default();
    assert_eq!(viewport.window(50), (50, 1050, 0, 5));
    assert_eq!(viewport.passed(500), (i64::MIN, 300, 0, 5));

    let viewport = Viewport::default()
        .set_lookahead(300)
        .set_trail(0)
        .set_lanes(0, 2);
    assert_eq!(viewport.window(100), (100, 400, 0, 2));
    assert_eq!(viewport.passed(100), (i64::MIN, 100, 0, 2));

    // window bounds saturate.
    assert_eq!(viewport.window(i64::MAX).1, i64::MAX);
    assert_eq!(Viewport::default().passed(i64::MIN).1, i64::MIN);
}

#[test]
fn test_place() {
    let mut avl = track();
    assert_eq!(avl.len(), 40);
    assert!(!avl.place(0, 0, ObstacleKind::Oil, 10, 10));
    assert_eq!(avl.get(&Key::new(0, 0)).unwrap().kind(), ObstacleKind::Rock);

    // lanes are not validated by the index.
    assert!(avl.place(0, 9, ObstacleKind::Barrier, 30, 30));
    let barrier = avl.get(&Key::new(0, 9)).unwrap();
    assert!(barrier.is_jumpable());
    assert!(avl.validate().is_ok());
}

#[test]
fn test_visible() {
    let avl = track();
    let viewport = Viewport::default().set_lookahead(500);

    let mut xs: Vec<i64> = avl
        .visible(&viewport, 1000)
        .iter()
        .map(|e| e.primary())
        .collect();
    xs.sort();
    assert_eq!(xs, vec![1000, 1100, 1200, 1300, 1400, 1500]);

    let viewport = viewport.set_lanes(0, 0);
    let xs: Vec<i64> = avl.visible(&viewport, 0).iter().map(|e| e.primary()).collect();
    assert_eq!(xs, vec![0]);

    assert!(avl.visible(&Viewport::default(), 10_000).is_empty());
}

#[test]
fn test_evict_passed() {
    let mut avl = track();
    let viewport = Viewport::default();

    // nothing behind the trail yet.
    assert_eq!(avl.evict_passed(&viewport, 150), 0);
    assert_eq!(avl.len(), 40);

    // evicts 0, 100 .. 800
    assert_eq!(avl.evict_passed(&viewport, 1000), 9);
    assert_eq!(avl.len(), 31);
    assert!(avl.validate().is_ok());
    let first = avl.traverse_in_order()[0].primary();
    assert_eq!(first, 900);

    // second pass at the same position is a no-op.
    assert_eq!(avl.evict_passed(&viewport, 1000), 0);

    assert_eq!(avl.evict_passed(&viewport, i64::MAX), 31);
    assert!(avl.is_empty());
    assert!(avl.validate().is_ok());
}

#[test]
fn test_drive() {
    let mut avl = track();
    let viewport = Viewport::default();
    let mut position = 0;
    let mut seen = std::collections::HashSet::new();
    while !avl.is_empty() {
        for entry in avl.visible(&viewport, position).into_iter() {
            assert!(entry.primary() >= position);
            assert!(entry.primary() <= position + viewport.lookahead);
            seen.insert(entry.key());
        }
        avl.evict_passed(&viewport, position);
        assert!(avl.validate().is_ok());
        position += 10;
    }
    assert_eq!(seen.len(), 40);
}
