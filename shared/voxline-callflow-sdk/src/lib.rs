//! Voxline Call-Flow SDK
//!
//! Translates high-level call-handling intent (AI receptionist, IVR menus,
//! call queues, voicemail, forwarding) into the declarative SWML call-control
//! document executed by the telephony platform.

pub mod document;
pub mod generator;
pub mod serializer;
pub mod validator;

#[cfg(test)]
mod tests;

pub use document::{
    Action, AiAction, AiParams, AiPrompt, CallFlowDocument, ConnectAction, ConnectDestination,
    ExecuteAction, FunctionParameters, HangupAction, PlayAction, PromptAction, PropertySpec,
    RecordAction, Swaig, SwaigFunction, SwitchAction, Transcription, DOCUMENT_VERSION,
};
pub use generator::{
    ai_receptionist, call_queue, forward_call, ivr_menu, voicemail, AiReceptionistParams,
    CallQueueParams, ForwardCallParams, IvrMenuOption, IvrMenuParams, IvrOptionAction,
    RingStrategy, VoicemailParams,
};
pub use serializer::{deserialize, serialize, CallFlowError};
pub use validator::{validate, validate_value, ValidationReport};
