//! Administrative actions
//!
//! Named operator actions and the console commands they translate to.

use crate::error::Result;
use crate::network::RconClient;

/// An operator action against a running server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// List online players
    ListPlayers,

    /// Server status (the player list doubles as a liveness check)
    Status,

    /// Ban a player by name
    Ban { player: String },

    /// Broadcast a chat message to every player
    Broadcast { message: String },

    /// Ask the server to restart
    Restart,

    /// Send a console command verbatim
    Raw(String),
}

impl AdminAction {
    /// Console command text for this action
    pub fn to_command(&self) -> String {
        match self {
            AdminAction::ListPlayers | AdminAction::Status => "list".to_string(),
            AdminAction::Ban { player } => format!("ban {}", player),
            AdminAction::Broadcast { message } => format!("say {}", message),
            AdminAction::Restart => "restart".to_string(),
            AdminAction::Raw(command) => command.clone(),
        }
    }

    /// Execute the action and return the server's reply
    pub fn run(&self, client: &mut RconClient) -> Result<String> {
        let command = self.to_command();
        tracing::info!("Running {:?} as `{}`", self, command);
        client.command(&command)
    }
}
