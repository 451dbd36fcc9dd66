use glam::Vec2;
use pacman_lite::systems::movement::{collides_with_any, Aabb};
use speculoos::prelude::*;

fn tile_at(x: f32, y: f32) -> Aabb {
    Aabb::new(Vec2::new(x, y), Vec2::splat(32.0))
}

#[test]
fn test_overlap_is_symmetric() {
    let a = tile_at(100.0, 100.0);
    let b = tile_at(120.0, 90.0);
    let c = tile_at(200.0, 100.0);

    assert_that(&a.overlaps(&b)).is_true();
    assert_that(&b.overlaps(&a)).is_true();
    assert_that(&a.overlaps(&c)).is_false();
    assert_that(&c.overlaps(&a)).is_false();
}

#[test]
fn test_shared_edges_do_not_collide() {
    let a = tile_at(64.0, 64.0);

    // Each neighbour touches exactly one edge (or corner) of `a`
    for neighbour in [
        tile_at(96.0, 64.0),
        tile_at(32.0, 64.0),
        tile_at(64.0, 96.0),
        tile_at(64.0, 32.0),
        tile_at(96.0, 96.0),
    ] {
        assert_that(&a.overlaps(&neighbour)).is_false();
    }

    // One pixel further in is a hit
    assert_that(&a.overlaps(&tile_at(95.0, 64.0))).is_true();
}

#[test]
fn test_pellet_inside_tile_overlaps() {
    let player = tile_at(256.0, 480.0);
    let pellet = Aabb::new(Vec2::new(270.0, 494.0), Vec2::splat(4.0));

    assert_that(&player.overlaps(&pellet)).is_true();
    assert_that(&pellet.overlaps(&player)).is_true();
}

#[test]
fn test_collides_with_any() {
    let probe = tile_at(0.0, 0.0);

    assert_that(&collides_with_any(&probe, &[])).is_false();
    assert_that(&collides_with_any(&probe, &[tile_at(32.0, 0.0), tile_at(0.0, 32.0)])).is_false();
    assert_that(&collides_with_any(&probe, &[tile_at(32.0, 0.0), tile_at(16.0, 16.0)])).is_true();
}

#[test]
fn test_translated_keeps_size() {
    let moved = tile_at(10.0, 10.0).translated(Vec2::new(8.0, -8.0));

    assert_that(&moved.min).is_equal_to(Vec2::new(18.0, 2.0));
    assert_that(&moved.size).is_equal_to(Vec2::splat(32.0));
    assert_that(&moved.max()).is_equal_to(Vec2::new(50.0, 34.0));
}
