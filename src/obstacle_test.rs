use crate::entry::Entry;
use crate::obstacle::{
    DamageTable, Hitbox, Obstacle, ObstacleKind, BARRIER_HEIGHT, DEFAULT_SIZE,
};

#[test]
fn test_kind_names() {
    for kind in ObstacleKind::ALL.iter() {
        assert_eq!(kind.name().parse::<ObstacleKind>(), Ok(*kind));
        assert_eq!(kind.to_string(), kind.name());
    }
    assert!("boulder".parse::<ObstacleKind>().is_err());
}

#[test]
fn test_damage_table() {
    let mut table = DamageTable::default();
    assert_eq!(table.damage(ObstacleKind::Rock), 20);
    assert_eq!(table.damage(ObstacleKind::Cone), 10);
    assert_eq!(table.damage(ObstacleKind::Pothole), 15);
    assert_eq!(table.damage(ObstacleKind::Oil), 5);
    assert_eq!(table.damage(ObstacleKind::Barrier), 25);

    assert_eq!(table.set(ObstacleKind::Oil, 7), 5);
    assert_eq!(table.damage(ObstacleKind::Oil), 7);
    assert_eq!(Obstacle::new(ObstacleKind::Oil).damage(&table), 7);
    assert_eq!(table.damage(ObstacleKind::Rock), 20);
}

#[test]
fn test_obstacle() {
    let rock = Obstacle::new(ObstacleKind::Rock);
    assert_eq!((rock.width(), rock.height()), (DEFAULT_SIZE, DEFAULT_SIZE));
    assert!(!rock.is_barrier());
    assert!(!rock.is_jumpable());

    let barrier = Obstacle::with_size(ObstacleKind::Barrier, 40, 10);
    assert_eq!((barrier.width(), barrier.height()), (40, BARRIER_HEIGHT));
    assert!(barrier.is_barrier());
    assert!(barrier.is_jumpable());

    let cone = Obstacle::with_size(ObstacleKind::Cone, 20, 25);
    assert_eq!(cone.kind(), ObstacleKind::Cone);
    assert_eq!((cone.width(), cone.height()), (20, 25));
}

#[test]
fn test_hitbox() {
    let entry = Entry::new(350, 2, Obstacle::with_size(ObstacleKind::Pothole, 45, 20));
    let want = Hitbox {
        x: 350,
        y: 2,
        width: 45,
        height: 20,
    };
    assert_eq!(entry.hitbox(), want);
}
