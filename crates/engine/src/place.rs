use blockfall_core::game_state::GameState;
use blockfall_core::rng::PieceSource;
use blockfall_core::types::{Direction, Rotation, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    UnknownPlayer,
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::UnknownPlayer => "unknown_player",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NotPlayable
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::UnknownPlayer => "no player with that id in this match",
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Rotate to `target_rot`, walk to `target_x`, then hard drop.
///
/// On error the session is left exactly as it was.
pub fn apply_place<S: PieceSource + ?Sized>(
    state: &mut GameState,
    source: &mut S,
    target_x: i8,
    target_rot: Rotation,
) -> Result<(), PlaceError> {
    let before = state.clone();
    let result = place_inner(state, source, target_x, target_rot);
    if result.is_err() {
        *state = before;
    }
    result
}

fn place_inner<S: PieceSource + ?Sized>(
    state: &mut GameState,
    source: &mut S,
    target_x: i8,
    target_rot: Rotation,
) -> Result<(), PlaceError> {
    if !state.playable() {
        return Err(PlaceError::NotPlayable);
    }

    let Some(active0) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    let cur = active0.rotation.index() as i8;
    let tgt = target_rot.index() as i8;
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;

    // Shorter turn first; a half turn tries both directions.
    let mut plans = [(Direction::Cw, cw), (Direction::Ccw, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let start = state.clone();
    let mut rotated = false;
    for (direction, steps) in plans {
        *state = start.clone();
        if (0..steps).all(|_| state.rotate(direction)) {
            rotated = true;
            break;
        }
    }
    if !rotated {
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };
    if active.rotation != target_rot {
        return Err(PlaceError::RotationBlocked);
    }

    // Validate x bounds based on the rotated mask.
    let mask = active.mask();
    let (min_dx, max_dx) = mask
        .cells()
        .fold((i8::MAX, i8::MIN), |(lo, hi), (dx, _)| (lo.min(dx), hi.max(dx)));
    let target_x16 = target_x as i16;
    if target_x16 + (min_dx as i16) < 0 || target_x16 + max_dx as i16 >= BOARD_WIDTH as i16 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = target_x - active.x;
    for _ in 0..dx.unsigned_abs() {
        if !state.shift(dx.signum()) {
            return Err(PlaceError::XBlocked);
        }
    }

    if !state.hard_drop(source) {
        return Err(PlaceError::NotPlayable);
    }
    Ok(())
}
