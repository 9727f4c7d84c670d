//! Keyboard shortcuts of the adventure map.

use game_core::Direction;

use crate::api::Key;

use super::commands::Command;

/// Maps a key to its command. `debug` unlocks the cheat keys.
pub fn command_for(key: Key, debug: bool) -> Option<Command> {
    let command = match key {
        Key::Char(c) => match c.to_ascii_lowercase() {
            'e' => Command::EndTurn,
            'h' => Command::NextHero,
            't' => Command::NextTown,
            'm' => Command::ContinueMovement,
            'z' => Command::SleepHero,
            'd' => Command::Dig,
            's' => Command::Save,
            'l' => Command::LoadGame,
            'n' => Command::NewGame,
            'q' => Command::Quit,
            'i' => Command::ToggleInterface,
            'r' => Command::KingdomSummary,
            ' ' => Command::OpenFocus,
            digit @ '1'..='9' => Command::StepFocusedHero(numpad_direction(digit)?),
            _ => return None,
        },
        Key::Up => Command::StepFocusedHero(Direction::Top),
        Key::Down => Command::StepFocusedHero(Direction::Bottom),
        Key::Left => Command::StepFocusedHero(Direction::Left),
        Key::Right => Command::StepFocusedHero(Direction::Right),
        Key::Enter => Command::OpenFocus,
        Key::Escape => Command::Quit,
        Key::Function(12) if debug => Command::RevealMap,
        Key::Function(_) => return None,
    };
    Some(command)
}

/// Numpad layout: 7 8 9 on top, 1 2 3 at the bottom. 5 stays put.
fn numpad_direction(digit: char) -> Option<Direction> {
    Some(match digit {
        '7' => Direction::TopLeft,
        '8' => Direction::Top,
        '9' => Direction::TopRight,
        '4' => Direction::Left,
        '6' => Direction::Right,
        '1' => Direction::BottomLeft,
        '2' => Direction::Bottom,
        '3' => Direction::BottomRight,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(command_for(Key::Char('e'), false), Some(Command::EndTurn));
        assert_eq!(command_for(Key::Char('E'), false), Some(Command::EndTurn));
        assert_eq!(command_for(Key::Char('x'), false), None);
    }

    #[test]
    fn numpad_moves_diagonally() {
        assert_eq!(
            command_for(Key::Char('7'), false),
            Some(Command::StepFocusedHero(Direction::TopLeft))
        );
        assert_eq!(
            command_for(Key::Char('3'), false),
            Some(Command::StepFocusedHero(Direction::BottomRight))
        );
        assert_eq!(command_for(Key::Char('5'), false), None);
        assert_eq!(
            command_for(Key::Up, false),
            Some(Command::StepFocusedHero(Direction::Top))
        );
    }

    #[test]
    fn reveal_map_needs_debug() {
        assert_eq!(command_for(Key::Function(12), false), None);
        assert_eq!(command_for(Key::Function(12), true), Some(Command::RevealMap));
    }

    #[test]
    fn escape_and_q_both_quit() {
        assert_eq!(command_for(Key::Escape, false), Some(Command::Quit));
        assert_eq!(command_for(Key::Char('q'), false), Some(Command::Quit));
    }
}
