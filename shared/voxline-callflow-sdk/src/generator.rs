//! Call-flow archetype generators
//!
//! Five builders that translate high-level call-handling intent into a
//! complete, ready-to-serialize [`CallFlowDocument`]. Every builder is a pure
//! function: the same parameters always produce a structurally identical
//! document, missing optionals take fixed literal defaults, and semantically
//! broken inputs still yield a structurally valid document (failure detection
//! is deferred to the platform).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::document::{
    Action, AiAction, AiParams, AiPrompt, CallFlowDocument, ConnectAction, ConnectDestination,
    PromptAction, RecordAction, Swaig, SwaigFunction, SwitchAction, Transcription,
};

/// Platform placeholder for the inbound caller's number
const CALLER_ID_PLACEHOLDER: &str = "%{call.from}";

/// Silent loop that keeps the media channel alive during AI turns
const SILENCE_TRACK_URL: &str = "https://cdn.voxline.io/audio/silence.mp3";

const DEFAULT_HOLD_MUSIC_URL: &str = "https://cdn.voxline.io/audio/hold-music.mp3";

// =============================================================================
// AI Receptionist
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiReceptionistParams {
    pub voice: String,
    pub language: String,
    pub engine: String,
    pub greeting: String,
    pub system_prompt: String,
    pub post_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub transfer_number: Option<String>,
    pub business_hours: Option<String>,
    /// Seconds of caller silence before the agent takes action
    pub end_call_on_silence: u32,
}

impl Default for AiReceptionistParams {
    fn default() -> Self {
        Self {
            voice: "en-US-Neural2-F".to_string(),
            language: "en-US".to_string(),
            engine: "gcloud".to_string(),
            greeting: "Thank you for calling. How can I help you today?".to_string(),
            system_prompt: "You are a helpful and professional receptionist. \
                            Answer the caller's questions politely and concisely."
                .to_string(),
            post_prompt: "If the caller seems frustrated, offer to transfer them to a human agent."
                .to_string(),
            temperature: 0.7,
            max_tokens: 150,
            transfer_number: None,
            business_hours: None,
            end_call_on_silence: 5,
        }
    }
}

/// Build an AI receptionist flow: optional spoken greeting, then hand the
/// call to a conversational agent with transfer/end/take-message functions.
pub fn ai_receptionist(params: AiReceptionistParams) -> CallFlowDocument {
    let mut prompt_lines = vec![params.system_prompt.clone()];
    if let Some(hours) = &params.business_hours {
        prompt_lines.push(format!("Business hours: {}", hours));
    }
    if let Some(number) = &params.transfer_number {
        prompt_lines.push(format!(
            "When the caller asks for a human, use the transfer_call function to transfer them to {}.",
            number
        ));
    }

    let functions = vec![
        SwaigFunction::new("transfer_call", "Transfer the caller to a human agent")
            .with_property("reason", "string", "Why the caller asked to be transferred"),
        SwaigFunction::new("end_call", "End the call when the conversation is complete")
            .with_property("reason", "string", "Why the call is ending"),
        SwaigFunction::new("take_message", "Record a message from the caller")
            .with_property("name", "string", "Caller's name")
            .with_property("phone", "string", "Caller's callback number")
            .with_property("message", "string", "The message to pass along")
            .with_required(&["message"]),
    ];

    let ai = Action::Ai(AiAction {
        voice: params.voice,
        engine: params.engine,
        language: params.language,
        prompt: AiPrompt {
            text: prompt_lines.join("\n"),
            temperature: Some(params.temperature),
            max_tokens: Some(params.max_tokens),
        },
        post_prompt: AiPrompt::text_only(&params.post_prompt),
        swaig: Swaig { functions },
        params: AiParams {
            end_of_speech_timeout: params.end_call_on_silence * 1000,
            attention_timeout: 30_000,
            inactivity_timeout: 60_000,
            background_file: SILENCE_TRACK_URL.to_string(),
            background_file_loops: -1,
            background_file_volume: 0,
        },
    });

    let mut actions = Vec::new();
    // Callers always hear the greeting before the agent prompt begins
    if !params.greeting.is_empty() {
        actions.push(Action::say(&params.greeting));
    }
    actions.push(ai);

    CallFlowDocument::single_section(actions)
}

// =============================================================================
// IVR Menu
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IvrMenuParams {
    pub greeting: String,
    pub options: Vec<IvrMenuOption>,
    /// Digit collection timeout in seconds
    pub timeout: u32,
    /// Accepted for compatibility; the generated document loops on invalid
    /// input indefinitely rather than counting attempts
    pub max_attempts: u32,
    pub invalid_message: String,
    pub timeout_message: String,
}

impl Default for IvrMenuParams {
    fn default() -> Self {
        Self {
            greeting: "Thank you for calling.".to_string(),
            options: Vec::new(),
            timeout: 10,
            max_attempts: 3,
            invalid_message: "Sorry, that is not a valid option.".to_string(),
            timeout_message: "We did not receive a selection.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IvrMenuOption {
    pub digit: String,
    pub label: String,
    pub action: IvrOptionAction,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IvrOptionAction {
    Transfer,
    Voicemail,
    Submenu,
    Hangup,
    Repeat,
}

/// Build a single-level IVR menu: spoken option list, DTMF/speech prompt,
/// then a switch with one case per digit and a re-prompting default branch.
pub fn ivr_menu(params: IvrMenuParams) -> CallFlowDocument {
    let menu_text = params
        .options
        .iter()
        .map(|o| format!("Press {} for {}", o.digit, o.label))
        .collect::<Vec<_>>()
        .join(". ");
    let prompt_text = format!("{} {}", params.greeting, menu_text);

    let prompt = Action::Prompt(PromptAction {
        play: format!("say:{}", prompt_text),
        max_digits: 1,
        terminators: "#".to_string(),
        digit_timeout: params.timeout,
        speech_timeout: 30,
        end_silence_timeout: 3,
    });

    let mut cases: BTreeMap<String, Vec<Action>> = BTreeMap::new();
    for option in &params.options {
        cases.insert(option.digit.clone(), option_actions(option));
    }

    let switch = Action::Switch(SwitchAction {
        variable: "prompt_value".to_string(),
        case: cases,
        default: vec![
            Action::say(&params.invalid_message),
            Action::execute_section("main"),
        ],
    });

    CallFlowDocument::single_section(vec![prompt, switch])
}

fn option_actions(option: &IvrMenuOption) -> Vec<Action> {
    let target = option.target.clone().unwrap_or_default();

    match option.action {
        IvrOptionAction::Transfer => vec![
            Action::say("Please hold while we transfer your call."),
            Action::Connect(ConnectAction {
                to: Some(target),
                from: None,
                timeout: 30,
                parallel: None,
                serial: None,
            }),
        ],
        IvrOptionAction::Voicemail => vec![
            Action::say("Please leave a message after the beep."),
            Action::Record(RecordAction {
                beep: true,
                max_length: 120,
                format: "mp3".to_string(),
                terminators: "#".to_string(),
                transcription: None,
            }),
            Action::say("Thank you for your message. Goodbye."),
            Action::hangup(),
        ],
        IvrOptionAction::Submenu => vec![Action::execute_section(&target)],
        IvrOptionAction::Repeat => vec![Action::execute_section("main")],
        IvrOptionAction::Hangup => vec![
            Action::say("Thank you for calling. Goodbye."),
            Action::hangup(),
        ],
    }
}

// =============================================================================
// Call Queue
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CallQueueParams {
    pub name: String,
    pub agents: Vec<String>,
    pub ring_strategy: RingStrategy,
    /// Seconds to ring before moving on
    pub ring_timeout: u32,
    pub hold_music: String,
    pub announce_position: bool,
    /// Accepted for compatibility; not structurally enforced by the document
    pub max_wait_time: u32,
}

impl Default for CallQueueParams {
    fn default() -> Self {
        Self {
            name: "support".to_string(),
            agents: Vec::new(),
            ring_strategy: RingStrategy::RoundRobin,
            ring_timeout: 20,
            hold_music: DEFAULT_HOLD_MUSIC_URL.to_string(),
            announce_position: true,
            max_wait_time: 300,
        }
    }
}

/// Agent ring ordering. Only `ring_all` rings simultaneously; `random` and
/// `least_recent` receive the same sequential treatment as `round_robin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingStrategy {
    RoundRobin,
    RingAll,
    Random,
    LeastRecent,
}

/// Build a call-queue flow: announcements, hold music, agent dispatch, and a
/// voicemail fallback when nobody answers.
pub fn call_queue(params: CallQueueParams) -> CallFlowDocument {
    let destinations: Vec<ConnectDestination> = params
        .agents
        .iter()
        .map(|a| ConnectDestination { to: a.clone() })
        .collect();

    let connect = if params.ring_strategy == RingStrategy::RingAll {
        Action::Connect(ConnectAction {
            to: None,
            from: None,
            timeout: params.ring_timeout,
            parallel: Some(destinations),
            serial: None,
        })
    } else {
        Action::Connect(ConnectAction {
            to: None,
            from: None,
            timeout: params.ring_timeout,
            parallel: None,
            serial: Some(destinations),
        })
    };

    let mut actions = vec![Action::say(&format!(
        "You have reached the {} queue.",
        params.name
    ))];
    if params.announce_position {
        actions.push(Action::say(
            "Please hold while we connect you to the next available representative.",
        ));
    }
    actions.push(Action::play_url(&params.hold_music));
    actions.push(connect);
    // Reached only when every agent failed to answer
    actions.push(Action::say(
        "We are sorry, no one is available to take your call right now. \
         Please leave a message after the beep.",
    ));
    actions.push(Action::Record(RecordAction {
        beep: true,
        max_length: 120,
        format: "mp3".to_string(),
        terminators: "#".to_string(),
        transcription: None,
    }));
    actions.push(Action::hangup());

    CallFlowDocument::single_section(actions)
}

// =============================================================================
// Voicemail
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoicemailParams {
    pub greeting: String,
    /// Maximum recording length in seconds
    pub max_length: u32,
    pub transcribe: bool,
    pub webhook_url: Option<String>,
}

impl Default for VoicemailParams {
    fn default() -> Self {
        Self {
            greeting: "Please leave a message after the beep.".to_string(),
            max_length: 120,
            transcribe: true,
            webhook_url: None,
        }
    }
}

/// Build a voicemail-capture flow. Transcription is attached only when both
/// `transcribe` is set and a webhook URL is provided.
pub fn voicemail(params: VoicemailParams) -> CallFlowDocument {
    let transcription = if params.transcribe {
        params.webhook_url.map(|url| Transcription { url })
    } else {
        None
    };

    CallFlowDocument::single_section(vec![
        Action::say(&params.greeting),
        Action::Record(RecordAction {
            beep: true,
            max_length: params.max_length,
            format: "mp3".to_string(),
            terminators: "#".to_string(),
            transcription,
        }),
        Action::say("Thank you for your message. Goodbye."),
        Action::hangup(),
    ])
}

// =============================================================================
// Forward Call
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardCallParams {
    pub to: String,
    /// Defaults to the inbound caller's number
    pub from: Option<String>,
    pub timeout: u32,
    pub announcement: Option<String>,
}

impl Default for ForwardCallParams {
    fn default() -> Self {
        Self {
            to: String::new(),
            from: None,
            timeout: 30,
            announcement: None,
        }
    }
}

/// Build a simple forwarding flow: optional announcement, then a single
/// bridge. No voicemail fallback; unanswered calls end per platform default.
pub fn forward_call(params: ForwardCallParams) -> CallFlowDocument {
    let mut actions = Vec::new();
    if let Some(announcement) = &params.announcement {
        actions.push(Action::say(announcement));
    }
    actions.push(Action::Connect(ConnectAction {
        to: Some(params.to),
        from: Some(
            params
                .from
                .unwrap_or_else(|| CALLER_ID_PLACEHOLDER.to_string()),
        ),
        timeout: params.timeout,
        parallel: None,
        serial: None,
    }));

    CallFlowDocument::single_section(actions)
}
