use glam::UVec2;
use pacman_lite::constants::{MapTile, RAW_BOARD, TUNNEL_ROW};
use pacman_lite::error::ParseError;
use pacman_lite::map::parser::MapTileParser;
use pacman_lite::systems::components::Ghost;
use speculoos::prelude::*;

/// The shipped board with one character replaced.
fn board_with(row: usize, column: usize, c: char) -> Vec<String> {
    let mut board: Vec<String> = RAW_BOARD.iter().map(|line| line.to_string()).collect();
    board[row].replace_range(column..column + 1, &c.to_string());
    board
}

fn as_rows(board: &[String]) -> Vec<&str> {
    board.iter().map(String::as_str).collect()
}

#[test]
fn test_parse_character() {
    let test_cases = [
        ('X', MapTile::Wall),
        (' ', MapTile::Pellet),
        ('O', MapTile::Empty),
        ('P', MapTile::PlayerSpawn),
        ('r', MapTile::GhostSpawn(Ghost::Blinky)),
        ('p', MapTile::GhostSpawn(Ghost::Pinky)),
        ('b', MapTile::GhostSpawn(Ghost::Inky)),
        ('o', MapTile::GhostSpawn(Ghost::Clyde)),
    ];

    for (c, expected) in test_cases {
        assert_that(&MapTileParser::parse_character(c)).is_equal_to(Ok(expected));
    }

    assert_that(&MapTileParser::parse_character('#')).is_equal_to(Err(ParseError::UnknownCharacter('#')));
    assert_that(&MapTileParser::parse_character('x')).is_equal_to(Err(ParseError::UnknownCharacter('x')));
}

#[test]
fn test_parse_shipped_board() {
    let parsed = MapTileParser::parse_board(&RAW_BOARD, TUNNEL_ROW).expect("Shipped board should parse");

    assert_that(&parsed.player_spawn).is_equal_to(UVec2::new(9, 15));
    assert_that(&parsed.tunnel_row).is_equal_to(TUNNEL_ROW);
    assert_that(&parsed.ghost_spawns.to_vec()).is_equal_to(vec![
        (Ghost::Blinky, UVec2::new(9, 8)),
        (Ghost::Inky, UVec2::new(8, 9)),
        (Ghost::Pinky, UVec2::new(9, 9)),
        (Ghost::Clyde, UVec2::new(10, 9)),
    ]);
    assert_that(&parsed.tiles[0][0]).is_equal_to(MapTile::Wall);
    assert_that(&parsed.tiles[1][1]).is_equal_to(MapTile::Pellet);
    assert_that(&parsed.tiles[0][7]).is_equal_to(MapTile::Empty);
}

#[test]
fn test_unknown_character() {
    let board = board_with(1, 1, '#');

    let result = MapTileParser::parse_board(&as_rows(&board), TUNNEL_ROW);

    assert_that(&result.err()).is_equal_to(Some(ParseError::UnknownCharacter('#')));
}

#[test]
fn test_wrong_row_count() {
    let result = MapTileParser::parse_board(&RAW_BOARD[..20], TUNNEL_ROW);

    assert_that(&result.err()).is_equal_to(Some(ParseError::InvalidRowCount { expected: 21, found: 20 }));
}

#[test]
fn test_wrong_row_width() {
    let mut board: Vec<String> = RAW_BOARD.iter().map(|line| line.to_string()).collect();
    board[3].pop();

    let result = MapTileParser::parse_board(&as_rows(&board), TUNNEL_ROW);

    assert_that(&result.err()).is_equal_to(Some(ParseError::InvalidRowWidth {
        row: 3,
        expected: 19,
        found: 18,
    }));
}

#[test]
fn test_two_player_spawns() {
    let board = board_with(19, 1, 'P');

    let result = MapTileParser::parse_board(&as_rows(&board), TUNNEL_ROW);

    assert_that(&result.err()).is_equal_to(Some(ParseError::InvalidPlayerSpawnCount(2)));
}

#[test]
fn test_missing_player_spawn() {
    let board = board_with(15, 9, ' ');

    let result = MapTileParser::parse_board(&as_rows(&board), TUNNEL_ROW);

    assert_that(&result.err()).is_equal_to(Some(ParseError::InvalidPlayerSpawnCount(0)));
}

#[test]
fn test_no_ghost_spawns() {
    let board: Vec<String> = RAW_BOARD
        .iter()
        .map(|line| line.replace(['r', 'p', 'b', 'o'], "O"))
        .collect();

    let result = MapTileParser::parse_board(&as_rows(&board), TUNNEL_ROW);

    assert_that(&result.err()).is_equal_to(Some(ParseError::NoGhostSpawns));
}

#[test]
fn test_tunnel_row_out_of_range() {
    let result = MapTileParser::parse_board(&RAW_BOARD, 21);

    assert_that(&result.err()).is_equal_to(Some(ParseError::TunnelRowOutOfRange { row: 21, rows: 21 }));
}
