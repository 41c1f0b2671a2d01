use crate::engine::session::GameSession;
use crate::game::Color;

/// The search's static evaluation signal: material captured by `side`
/// minus material captured by its opponent. Terminal positions score the
/// same way; there is no mate bonus, so the engine prefers lines by
/// material alone.
pub(crate) fn captured_differential(session: &GameSession, side: Color) -> i32 {
    session.captured_value(side) as i32 - session.captured_value(side.opposite()) as i32
}
