use invaders::entities::*;
use invaders::score::HighScoreRecord;

#[test]
fn entity_construction_defaults() {
    let e = Entity::new(5, 7, 64, 32, Sprite::Enemy(2));
    assert_eq!(e.x, 5);
    assert_eq!(e.y, 7);
    assert_eq!(e.w, 64);
    assert_eq!(e.h, 32);
    assert_eq!(e.sprite, Sprite::Enemy(2));
    assert!(e.alive);
    assert!(!e.used);
}

#[test]
fn enums_clone_and_eq() {
    assert_eq!(Sprite::Ship, Sprite::Ship);
    assert_ne!(Sprite::ShipBullet, Sprite::EnemyBullet);
    assert_ne!(Sprite::Enemy(0), Sprite::Enemy(1));
    assert_eq!(GameMode::Playing, GameMode::Playing);
    assert_ne!(GameMode::Playing, GameMode::GameOver);

    let mode = GameMode::Paused;
    assert_eq!(mode.clone(), GameMode::Paused);
}

#[test]
fn input_snapshot_defaults_to_no_actions() {
    let input = InputSnapshot::default();
    assert!(!input.move_left);
    assert!(!input.move_right);
    assert!(!input.fire);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player_name: "Tester".to_string(),
        ship: Entity::new(480, 704, 64, 32, Sprite::Ship),
        enemies: Vec::new(),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        mode: GameMode::Playing,
        frame: 0,
        last_fired_frame: None,
        last_spawn_frame: 0,
        fall_speed: 3,
        enemy_bullet_speed: 5,
        high_score: HighScoreRecord::default(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.ship.x = 99;
    cloned.score = 999;
    cloned
        .enemies
        .push(Entity::new(5, 5, 64, 32, Sprite::Enemy(0)));

    assert_eq!(original.ship.x, 480);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
