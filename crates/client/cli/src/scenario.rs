//! Built-in demo map: four kingdoms around a lake.
use game_core::{
    ArtifactId, Color, Control, Position, Terrain, TileAction, TileMap, World, WorldError,
};

pub const MAP_WIDTH: u32 = 48;
pub const MAP_HEIGHT: u32 = 32;
pub const MAX_PLAYERS: usize = 4;

struct Seat {
    color: Color,
    castle: &'static str,
    castle_at: Position,
    hero: &'static str,
    hero_at: Position,
}

const SEATS: [Seat; MAX_PLAYERS] = [
    Seat {
        color: Color::Blue,
        castle: "Ironhold",
        castle_at: Position::new(4, 5),
        hero: "Ariane",
        hero_at: Position::new(6, 6),
    },
    Seat {
        color: Color::Green,
        castle: "Greenmarch",
        castle_at: Position::new(43, 5),
        hero: "Vesna",
        hero_at: Position::new(41, 6),
    },
    Seat {
        color: Color::Red,
        castle: "Redspire",
        castle_at: Position::new(4, 26),
        hero: "Korr",
        hero_at: Position::new(6, 25),
    },
    Seat {
        color: Color::Yellow,
        castle: "Goldcrest",
        castle_at: Position::new(43, 26),
        hero: "Tamsin",
        hero_at: Position::new(41, 25),
    },
];

/// Builds the demo world with `humans` human seats; the rest play as computer.
pub fn demo_world(humans: usize) -> Result<World, WorldError> {
    let humans = humans.clamp(1, MAX_PLAYERS);
    let mut world = World::new(terrain_map());

    for (index, seat) in SEATS.iter().enumerate() {
        let control = if index < humans {
            Control::Human
        } else {
            Control::Ai
        };
        world.add_kingdom(seat.color, control)?;
        world.build_castle(Some(seat.color), seat.castle, seat.castle_at)?;
        world.spawn_hero(seat.color, seat.hero, seat.hero_at)?;
    }
    world.build_castle(None, "Old Watch", Position::new(24, 5))?;

    let objects = [
        (Position::new(10, 10), TileAction::Resource { gold: 500 }),
        (Position::new(36, 11), TileAction::Resource { gold: 750 }),
        (Position::new(14, 20), TileAction::Resource { gold: 300 }),
        (Position::new(30, 24), TileAction::Artifact(ArtifactId(3))),
        (
            Position::new(20, 8),
            TileAction::Event {
                message: "An old hermit shares a map of the lake.".into(),
            },
        ),
    ];
    for (position, action) in objects {
        if let Some(tile) = world.map.tile_mut(position) {
            tile.action = Some(action);
        }
    }
    world.ultimate_artifact = Some(Position::new(33, 16));

    Ok(world)
}

fn terrain_map() -> TileMap {
    let mut map = TileMap::new(MAP_WIDTH, MAP_HEIGHT, Terrain::Grass);
    for y in 0..MAP_HEIGHT as i32 {
        for x in 0..MAP_WIDTH as i32 {
            let position = Position::new(x, y);
            let Some(tile) = map.tile_mut(position) else {
                continue;
            };
            tile.terrain = terrain_at(position);
            tile.blocked = is_mountain(position);
        }
    }
    map
}

fn terrain_at(Position { x, y }: Position) -> Terrain {
    // Ellipse centered on (24, 16) with radii 6 and 4, scaled to integers.
    let lake = (x - 24).pow(2) * 16 + (y - 16).pow(2) * 36;
    if lake <= 576 {
        Terrain::Water
    } else if lake <= 900 {
        Terrain::Sand
    } else if x == 24 || y == 8 {
        Terrain::Dirt
    } else if y < 4 {
        Terrain::Snow
    } else if x > 38 && y > 20 {
        Terrain::Swamp
    } else if (x + y) % 11 == 0 {
        Terrain::Rough
    } else {
        Terrain::Grass
    }
}

fn is_mountain(Position { x, y }: Position) -> bool {
    (y == 22 && (10..=14).contains(&x)) || (x == 35 && (5..=9).contains(&y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_are_split_between_humans_and_computer() {
        let world = demo_world(2).unwrap();

        let controls: Vec<_> = world
            .kingdoms()
            .map(|kingdom| (kingdom.color, kingdom.control))
            .collect();
        assert_eq!(
            controls,
            vec![
                (Color::Blue, Control::Human),
                (Color::Green, Control::Human),
                (Color::Red, Control::Ai),
                (Color::Yellow, Control::Ai),
            ]
        );
        assert!(world.kingdoms().all(|kingdom| kingdom.is_live()));
    }

    #[test]
    fn player_count_is_clamped() {
        let solo = demo_world(0).unwrap();
        assert_eq!(solo.kingdoms().filter(|k| k.is_human()).count(), 1);

        let crowd = demo_world(9).unwrap();
        assert_eq!(crowd.kingdoms().filter(|k| k.is_human()).count(), MAX_PLAYERS);
    }

    #[test]
    fn everything_stands_on_dry_open_ground() {
        let world = demo_world(1).unwrap();

        for seat in &SEATS {
            for position in [seat.castle_at, seat.hero_at] {
                let tile = world.map.tile(position).unwrap();
                assert!(!tile.blocked && !tile.terrain.is_water(), "{position}");
            }
        }
        let treasure = world.ultimate_artifact.unwrap();
        assert!(!world.map.tile(treasure).unwrap().terrain.is_water());
        assert_eq!(terrain_at(Position::new(24, 16)), Terrain::Water);
    }
}
