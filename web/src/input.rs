use cutesnake_core::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Turn(Direction),
    Start,
}

/// Maps a `KeyboardEvent.key` value to a game action.
pub(crate) fn key_action(key: &str) -> Option<KeyAction> {
    use Direction::*;
    use KeyAction::*;

    Some(match key {
        "ArrowUp" | "w" | "W" => Turn(Up),
        "ArrowDown" | "s" | "S" => Turn(Down),
        "ArrowLeft" | "a" | "A" => Turn(Left),
        "ArrowRight" | "d" | "D" => Turn(Right),
        " " | "Spacebar" | "Enter" => Start,
        _ => return None,
    })
}

/// Keys whose default action would scroll the page under the board.
pub(crate) fn suppresses_default(key: &str) -> bool {
    matches!(
        key,
        "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " " | "Spacebar"
    )
}
