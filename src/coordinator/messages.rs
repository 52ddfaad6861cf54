//! Status line texts shown by the coordinator.

use turnlink_board::Role;

/// Every status message the coordinator can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StatusMessage {
    /// Shown until someone claims the first mark.
    #[display("Press A to claim X")]
    ClaimPrompt,
    /// Local side claimed the first mark.
    #[display("You are X! Waiting for O...")]
    ClaimedFirst,
    /// Peer claimed first; local side plays second.
    #[display("You are O! Waiting for X...")]
    AssignedSecond,
    /// Peer accepted the second mark.
    #[display("O has joined! Starting game...")]
    OpponentJoined,
    /// Local player to move.
    #[display("Your turn")]
    YourTurn,
    /// Peer to move.
    #[display("Waiting for opponent...")]
    OpponentsTurn,
    /// Match won.
    #[display("{} wins! Press Start to play again.", _0)]
    Winner(Role),
    /// Board filled with no winner.
    #[display("It's a draw! Press Start to play again.")]
    Draw,
    /// Local restart sent; peer has not answered.
    #[display("Waiting for opponent to restart...")]
    RestartRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_names_the_mark() {
        assert_eq!(
            StatusMessage::Winner(Role::SecondMark).to_string(),
            "O wins! Press Start to play again."
        );
    }
}
