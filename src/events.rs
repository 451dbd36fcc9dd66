use crate::map::direction::Direction;

/// A player intent, already decoupled from whatever key produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
    Restart,
}

/// How the game reacted to a command, so the host loop can follow along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The direction was stored for the next tick that can honour it.
    Buffered,
    /// A finished game was started over; ticking should resume.
    Restarted,
    /// The host should shut down.
    Exit,
    /// Nothing changed.
    Ignored,
}

/// Whether the simulation wants to keep ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The game is over; further ticks do nothing until a restart.
    Halted,
}
