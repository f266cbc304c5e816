//! Key bindings: arrows and vim-style letters.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wellblocks::Command;

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Pause,
    Quit,
    None,
}

/// Map key event to game action. Unknown keys map to `Action::None`.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p' | 'P') => Action::Pause,
        KeyCode::Char('s' | 'S') => Action::Game(Command::Restart),
        KeyCode::Left | KeyCode::Char('h') => Action::Game(Command::Left),
        KeyCode::Right | KeyCode::Char('l') => Action::Game(Command::Right),
        KeyCode::Down | KeyCode::Char('j') => Action::Game(Command::Down),
        KeyCode::Up | KeyCode::Char('k') => Action::Game(Command::Rotate),
        _ => Action::None,
    }
}

/// Plant viewer adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantAction {
    Grow,
    Shrink,
    MoreIterations,
    FewerIterations,
    AngleDown,
    AngleUp,
    Quit,
    None,
}

/// z/x scale the step, a/s nudge the angle, w/e change iterations.
pub fn plant_key_to_action(key: KeyEvent) -> PlantAction {
    if !(key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) {
        return PlantAction::None;
    }
    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => PlantAction::Quit,
        KeyCode::Char('z') => PlantAction::Grow,
        KeyCode::Char('x') => PlantAction::Shrink,
        KeyCode::Char('a') | KeyCode::Left => PlantAction::AngleDown,
        KeyCode::Char('s') | KeyCode::Right => PlantAction::AngleUp,
        KeyCode::Char('w') | KeyCode::Up => PlantAction::MoreIterations,
        KeyCode::Char('e') | KeyCode::Down => PlantAction::FewerIterations,
        _ => PlantAction::None,
    }
}
