use crate::choice::ChoiceSetId;
use crate::instruction::{GroupId, OptionKind};
use crate::player::{PlayerRole, Position};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TacticError {
    #[error("Option not available: {kind}")]
    NotAvailable { kind: OptionKind },

    #[error("Option locked by role: {kind}")]
    Locked { kind: OptionKind },

    #[error("Choice unavailable: {option} in {set}")]
    OptionUnavailable { set: ChoiceSetId, option: &'static str },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Option {kind} is not part of {group}")]
    UnknownOption { group: GroupId, kind: OptionKind },

    #[error("No slot matches {kind}")]
    NoMatchingSlot { kind: OptionKind },

    #[error("Profile has no instruction group {0}")]
    MissingGroup(GroupId),

    #[error("Profile has no choice set {0}")]
    MissingChoiceSet(ChoiceSetId),

    #[error("Role {role} is not suitable for position {position}")]
    RoleNotSuitable { role: PlayerRole, position: Position },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Operation requires a {expected} profile")]
    WrongScope { expected: &'static str },
}

impl TacticError {
    /// Rejections of a user edit, as opposed to callers breaking the API contract.
    pub fn is_user_rejection(&self) -> bool {
        match self {
            TacticError::NotAvailable { .. } => true,
            TacticError::Locked { .. } => true,
            TacticError::OptionUnavailable { .. } => true,
            TacticError::RoleNotSuitable { .. } => true,
            TacticError::InvalidSnapshot(_) => false,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TacticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TacticError::Locked { kind: OptionKind::Tackling };
        assert_eq!(err.to_string(), "Option locked by role: tackling");

        let err = TacticError::OptionUnavailable {
            set: ChoiceSetId::ChanceCreation,
            option: "shoot_on_sight",
        };
        assert_eq!(err.to_string(), "Choice unavailable: shoot_on_sight in chance_creation");
    }

    #[test]
    fn test_user_rejection_classification() {
        assert!(TacticError::NotAvailable { kind: OptionKind::Dribbling }.is_user_rejection());
        assert!(!TacticError::InvalidSnapshot("bad".into()).is_user_rejection());
        assert!(!TacticError::MissingGroup(GroupId::InPossession).is_user_rejection());
    }
}
