use roomlink_core::RoomCommand;

/// What an owner plugin produces for one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reply {
    #[default]
    Silent,
    Command(RoomCommand),
    Commands(Vec<RoomCommand>),
}

impl Reply {
    pub fn into_commands(self) -> Vec<RoomCommand> {
        match self {
            Self::Silent => Vec::new(),
            Self::Command(command) => vec![command],
            Self::Commands(commands) => commands,
        }
    }
}

impl From<RoomCommand> for Reply {
    fn from(command: RoomCommand) -> Self {
        Self::Command(command)
    }
}

impl From<Vec<RoomCommand>> for Reply {
    fn from(commands: Vec<RoomCommand>) -> Self {
        Self::Commands(commands)
    }
}

impl From<Option<RoomCommand>> for Reply {
    fn from(command: Option<RoomCommand>) -> Self {
        command.map_or(Self::Silent, Self::Command)
    }
}
