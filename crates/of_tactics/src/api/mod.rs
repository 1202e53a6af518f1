pub mod json_api;

pub use json_api::{
    apply_command, apply_command_json, ApiError, ApiResponse, ChoiceChange, ChoiceRef,
    EditCommand, EditOutcome, API_VERSION,
};
