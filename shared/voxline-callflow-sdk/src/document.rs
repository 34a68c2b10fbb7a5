//! Call-flow document model
//!
//! Wire-compatible representation of the SWML call-control format. Field
//! names (`play`, `record`, `connect`, `SWAIG`, `end_of_speech_timeout`, ...)
//! are contract requirements parsed literally by the telephony platform.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format version emitted in every document
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// A complete call-control program
///
/// `sections` maps section names to ordered action lists; `"main"` is the
/// entry point executed when the document is invoked. BTreeMap keeps section
/// key order stable so serialization is byte-identical across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFlowDocument {
    pub version: String,
    pub sections: BTreeMap<String, Vec<Action>>,
}

impl CallFlowDocument {
    /// Create an empty document at the current format version
    pub fn new() -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            sections: BTreeMap::new(),
        }
    }

    /// Create a document with a single `main` section
    pub fn single_section(actions: Vec<Action>) -> Self {
        let mut doc = Self::new();
        doc.sections.insert("main".to_string(), actions);
        doc
    }

    /// Add a named section
    pub fn add_section(&mut self, name: &str, actions: Vec<Action>) {
        self.sections.insert(name.to_string(), actions);
    }

    /// The entry section, if present
    pub fn main(&self) -> Option<&[Action]> {
        self.sections.get("main").map(|a| a.as_slice())
    }
}

impl Default for CallFlowDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// A single call-control action
///
/// Externally tagged: each action serializes as an object with exactly one
/// verb key (`{"play": {...}}`, `{"hangup": {}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Speak text (via a `say:` directive) or play an audio URL
    Play(PlayAction),

    /// Capture audio from the caller
    Record(RecordAction),

    /// Bridge the call to one or more destinations
    Connect(ConnectAction),

    /// Branch on a previously captured input value
    Switch(SwitchAction),

    /// Jump to another named section
    Execute(ExecuteAction),

    /// Terminate the call
    Hangup(HangupAction),

    /// Play a prompt while collecting DTMF digits or speech
    Prompt(PromptAction),

    /// Hand the call to an AI conversational agent
    Ai(AiAction),
}

impl Action {
    /// Text-to-speech play action
    pub fn say(text: &str) -> Self {
        Action::Play(PlayAction {
            url: format!("say:{}", text),
            voice: None,
            language: None,
            volume: None,
        })
    }

    /// Play a media URL
    pub fn play_url(url: &str) -> Self {
        Action::Play(PlayAction {
            url: url.to_string(),
            voice: None,
            language: None,
            volume: None,
        })
    }

    /// Jump to the named section
    pub fn execute_section(name: &str) -> Self {
        Action::Execute(ExecuteAction {
            dest: format!("section:{}", name),
        })
    }

    /// Terminate the call
    pub fn hangup() -> Self {
        Action::Hangup(HangupAction {})
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayAction {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAction {
    pub beep: bool,
    pub max_length: u32,
    pub format: String,
    pub terminators: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<Transcription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    pub timeout: u32,

    /// Ring all destinations simultaneously; first to answer wins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<Vec<ConnectDestination>>,

    /// Ring destinations one at a time in list order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<Vec<ConnectDestination>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectDestination {
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchAction {
    pub variable: String,

    /// Branch key (captured digit) to follow-up actions
    pub case: BTreeMap<String, Vec<Action>>,

    /// Runs when no case matches
    pub default: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteAction {
    pub dest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HangupAction {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAction {
    pub play: String,
    pub max_digits: u32,
    pub terminators: String,
    pub digit_timeout: u32,
    pub speech_timeout: u32,
    pub end_silence_timeout: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAction {
    pub voice: String,
    pub engine: String,
    pub language: String,
    pub prompt: AiPrompt,
    pub post_prompt: AiPrompt,

    #[serde(rename = "SWAIG")]
    pub swaig: Swaig,

    pub params: AiParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiPrompt {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl AiPrompt {
    /// Prompt with text only (used for post-prompt instructions)
    pub fn text_only(text: &str) -> Self {
        Self {
            text: text.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Function-calling declarations exposed to the AI agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swaig {
    pub functions: Vec<SwaigFunction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaigFunction {
    pub function: String,
    pub description: String,
    pub parameters: FunctionParameters,
}

impl SwaigFunction {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            function: name.to_string(),
            description: description.to_string(),
            parameters: FunctionParameters {
                kind: "object".to_string(),
                properties: BTreeMap::new(),
                required: None,
            },
        }
    }

    pub fn with_property(mut self, name: &str, kind: &str, description: &str) -> Self {
        self.parameters.properties.insert(
            name.to_string(),
            PropertySpec {
                kind: kind.to_string(),
                description: description.to_string(),
            },
        );
        self
    }

    pub fn with_required(mut self, names: &[&str]) -> Self {
        self.parameters.required = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }
}

/// JSON-schema style parameter declaration; always `type: "object"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub kind: String,

    pub properties: BTreeMap<String, PropertySpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    #[serde(rename = "type")]
    pub kind: String,

    pub description: String,
}

/// Agent timing and background-audio parameters (milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiParams {
    pub end_of_speech_timeout: u32,
    pub attention_timeout: u32,
    pub inactivity_timeout: u32,
    pub background_file: String,
    pub background_file_loops: i32,
    pub background_file_volume: i32,
}
