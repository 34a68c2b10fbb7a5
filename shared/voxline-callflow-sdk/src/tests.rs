//! Tests for voxline-callflow-sdk

#[cfg(test)]
mod tests {
    mod ai_receptionist_tests {
        use crate::document::Action;
        use crate::generator::{ai_receptionist, AiReceptionistParams};
        use crate::serializer::serialize;

        #[test]
        fn test_greeting_prepends_play_action() {
            let doc = ai_receptionist(AiReceptionistParams {
                greeting: "Hello there.".to_string(),
                ..Default::default()
            });

            let main = doc.main().unwrap();
            assert_eq!(main.len(), 2);
            match &main[0] {
                Action::Play(play) => assert_eq!(play.url, "say:Hello there."),
                other => panic!("expected play action, got {:?}", other),
            }
            assert!(matches!(main[1], Action::Ai(_)));
        }

        #[test]
        fn test_empty_greeting_suppresses_play_action() {
            let doc = ai_receptionist(AiReceptionistParams {
                greeting: String::new(),
                ..Default::default()
            });

            let main = doc.main().unwrap();
            assert_eq!(main.len(), 1);
            assert!(matches!(main[0], Action::Ai(_)));
        }

        #[test]
        fn test_registers_three_functions() {
            let doc = ai_receptionist(AiReceptionistParams::default());

            let Action::Ai(ai) = &doc.main().unwrap()[1] else {
                panic!("expected ai action");
            };
            let names: Vec<&str> = ai
                .swaig
                .functions
                .iter()
                .map(|f| f.function.as_str())
                .collect();
            assert_eq!(names, vec!["transfer_call", "end_call", "take_message"]);

            let take_message = &ai.swaig.functions[2];
            assert_eq!(take_message.parameters.kind, "object");
            assert_eq!(
                take_message.parameters.required,
                Some(vec!["message".to_string()])
            );
            assert!(take_message.parameters.properties.contains_key("name"));
            assert!(take_message.parameters.properties.contains_key("phone"));
        }

        #[test]
        fn test_timing_parameters() {
            let doc = ai_receptionist(AiReceptionistParams {
                end_call_on_silence: 8,
                ..Default::default()
            });

            let Action::Ai(ai) = doc.main().unwrap().last().unwrap() else {
                panic!("expected ai action");
            };
            assert_eq!(ai.params.end_of_speech_timeout, 8000);
            assert_eq!(ai.params.attention_timeout, 30_000);
            assert_eq!(ai.params.inactivity_timeout, 60_000);
            assert_eq!(ai.params.background_file_loops, -1);
            assert_eq!(ai.params.background_file_volume, 0);
        }

        #[test]
        fn test_prompt_composition_skips_absent_clauses() {
            let doc = ai_receptionist(AiReceptionistParams {
                system_prompt: "Base prompt.".to_string(),
                business_hours: None,
                transfer_number: None,
                ..Default::default()
            });

            let Action::Ai(ai) = doc.main().unwrap().last().unwrap() else {
                panic!("expected ai action");
            };
            assert_eq!(ai.prompt.text, "Base prompt.");
            assert!(!ai.prompt.text.contains('\n'));
        }

        #[test]
        fn test_end_to_end_receptionist_document() {
            let doc = ai_receptionist(AiReceptionistParams {
                greeting: "Hi, thanks for calling Acme.".to_string(),
                transfer_number: Some("+15551112222".to_string()),
                business_hours: Some("Mon-Fri 9-5".to_string()),
                ..Default::default()
            });

            let text = serialize(&doc, false).unwrap();
            assert!(text.contains("Hi, thanks for calling Acme."));
            assert!(text.contains("Business hours: Mon-Fri 9-5"));
            assert!(text.contains("+15551112222"));
            assert!(text.contains("\"SWAIG\""));
            assert_eq!(text.matches("\"function\":").count(), 3);
        }
    }

    mod ivr_menu_tests {
        use crate::document::Action;
        use crate::generator::{ivr_menu, IvrMenuOption, IvrMenuParams, IvrOptionAction};

        fn option(digit: &str, label: &str, action: IvrOptionAction, target: Option<&str>) -> IvrMenuOption {
            IvrMenuOption {
                digit: digit.to_string(),
                label: label.to_string(),
                action,
                target: target.map(|t| t.to_string()),
            }
        }

        fn sales_and_support() -> IvrMenuParams {
            IvrMenuParams {
                greeting: "Welcome to Acme.".to_string(),
                options: vec![
                    option("1", "sales", IvrOptionAction::Transfer, Some("+15550001111")),
                    option("2", "support", IvrOptionAction::Voicemail, None),
                    option("3", "our directory", IvrOptionAction::Submenu, Some("directory")),
                    option("9", "this menu again", IvrOptionAction::Repeat, None),
                ],
                ..Default::default()
            }
        }

        #[test]
        fn test_prompt_synthesizes_option_list() {
            let doc = ivr_menu(sales_and_support());

            let Action::Prompt(prompt) = &doc.main().unwrap()[0] else {
                panic!("expected prompt action");
            };
            assert!(prompt.play.starts_with("say:Welcome to Acme."));
            assert!(prompt.play.contains("Press 1 for sales. Press 2 for support"));
            assert_eq!(prompt.max_digits, 1);
            assert_eq!(prompt.terminators, "#");
            assert_eq!(prompt.digit_timeout, 10);
        }

        #[test]
        fn test_switch_has_one_case_per_digit() {
            let doc = ivr_menu(sales_and_support());

            let Action::Switch(switch) = &doc.main().unwrap()[1] else {
                panic!("expected switch action");
            };
            assert_eq!(switch.variable, "prompt_value");
            assert_eq!(switch.case.len(), 4);
            for digit in ["1", "2", "3", "9"] {
                assert!(switch.case.contains_key(digit), "missing case {}", digit);
            }
        }

        #[test]
        fn test_transfer_case_connects_to_target() {
            let doc = ivr_menu(sales_and_support());

            let Action::Switch(switch) = &doc.main().unwrap()[1] else {
                panic!("expected switch action");
            };
            let case = &switch.case["1"];
            assert!(matches!(case[0], Action::Play(_)));
            match &case[1] {
                Action::Connect(connect) => {
                    assert_eq!(connect.to.as_deref(), Some("+15550001111"));
                }
                other => panic!("expected connect action, got {:?}", other),
            }
        }

        #[test]
        fn test_voicemail_case_ends_with_hangup() {
            let doc = ivr_menu(sales_and_support());

            let Action::Switch(switch) = &doc.main().unwrap()[1] else {
                panic!("expected switch action");
            };
            let case = &switch.case["2"];
            assert!(matches!(case[1], Action::Record(_)));
            assert!(matches!(case.last().unwrap(), Action::Hangup(_)));
        }

        #[test]
        fn test_submenu_and_repeat_jump_to_sections() {
            let doc = ivr_menu(sales_and_support());

            let Action::Switch(switch) = &doc.main().unwrap()[1] else {
                panic!("expected switch action");
            };
            match &switch.case["3"][0] {
                Action::Execute(execute) => assert_eq!(execute.dest, "section:directory"),
                other => panic!("expected execute action, got {:?}", other),
            }
            match &switch.case["9"][0] {
                Action::Execute(execute) => assert_eq!(execute.dest, "section:main"),
                other => panic!("expected execute action, got {:?}", other),
            }
        }

        #[test]
        fn test_default_branch_reprompts_main() {
            let doc = ivr_menu(sales_and_support());

            let Action::Switch(switch) = &doc.main().unwrap()[1] else {
                panic!("expected switch action");
            };
            match switch.default.last().unwrap() {
                Action::Execute(execute) => assert_eq!(execute.dest, "section:main"),
                other => panic!("expected execute action, got {:?}", other),
            }
        }
    }

    mod call_queue_tests {
        use crate::document::Action;
        use crate::generator::{call_queue, CallQueueParams, RingStrategy};

        fn three_agents(strategy: RingStrategy) -> CallQueueParams {
            CallQueueParams {
                name: "support".to_string(),
                agents: vec![
                    "+15550000001".to_string(),
                    "+15550000002".to_string(),
                    "+15550000003".to_string(),
                ],
                ring_strategy: strategy,
                ..Default::default()
            }
        }

        fn find_connect(doc: &crate::document::CallFlowDocument) -> &crate::document::ConnectAction {
            doc.main()
                .unwrap()
                .iter()
                .find_map(|a| match a {
                    Action::Connect(c) => Some(c),
                    _ => None,
                })
                .expect("queue flow must contain a connect action")
        }

        #[test]
        fn test_ring_all_dials_in_parallel() {
            let doc = call_queue(three_agents(RingStrategy::RingAll));

            let connect = find_connect(&doc);
            assert!(connect.serial.is_none());
            let parallel = connect.parallel.as_ref().unwrap();
            assert_eq!(parallel.len(), 3);
        }

        #[test]
        fn test_round_robin_dials_serially_in_order() {
            let doc = call_queue(three_agents(RingStrategy::RoundRobin));

            let connect = find_connect(&doc);
            assert!(connect.parallel.is_none());
            let serial = connect.serial.as_ref().unwrap();
            let order: Vec<&str> = serial.iter().map(|d| d.to.as_str()).collect();
            assert_eq!(order, vec!["+15550000001", "+15550000002", "+15550000003"]);
        }

        #[test]
        fn test_random_degrades_to_serial() {
            let doc = call_queue(three_agents(RingStrategy::Random));
            assert!(find_connect(&doc).serial.is_some());

            let doc = call_queue(three_agents(RingStrategy::LeastRecent));
            assert!(find_connect(&doc).serial.is_some());
        }

        #[test]
        fn test_position_announcement_is_optional() {
            let with = call_queue(three_agents(RingStrategy::RoundRobin));
            let without = call_queue(CallQueueParams {
                announce_position: false,
                ..three_agents(RingStrategy::RoundRobin)
            });

            assert_eq!(
                with.main().unwrap().len(),
                without.main().unwrap().len() + 1
            );
        }

        #[test]
        fn test_voicemail_fallback_after_no_answer() {
            let doc = call_queue(three_agents(RingStrategy::RoundRobin));

            let main = doc.main().unwrap();
            let tail: Vec<&Action> = main.iter().rev().take(3).collect();
            assert!(matches!(tail[0], Action::Hangup(_)));
            assert!(matches!(tail[1], Action::Record(_)));
            assert!(matches!(tail[2], Action::Play(_)));
        }
    }

    mod voicemail_tests {
        use crate::document::Action;
        use crate::generator::{voicemail, VoicemailParams};

        fn find_record(doc: &crate::document::CallFlowDocument) -> &crate::document::RecordAction {
            doc.main()
                .unwrap()
                .iter()
                .find_map(|a| match a {
                    Action::Record(r) => Some(r),
                    _ => None,
                })
                .expect("voicemail flow must contain a record action")
        }

        #[test]
        fn test_transcription_requires_both_flag_and_webhook() {
            let both = voicemail(VoicemailParams {
                transcribe: true,
                webhook_url: Some("https://app.voxline.io/api/webhooks/vm".to_string()),
                ..Default::default()
            });
            assert_eq!(
                find_record(&both).transcription.as_ref().unwrap().url,
                "https://app.voxline.io/api/webhooks/vm"
            );

            let flag_only = voicemail(VoicemailParams {
                transcribe: true,
                webhook_url: None,
                ..Default::default()
            });
            assert!(find_record(&flag_only).transcription.is_none());

            let webhook_only = voicemail(VoicemailParams {
                transcribe: false,
                webhook_url: Some("https://app.voxline.io/api/webhooks/vm".to_string()),
                ..Default::default()
            });
            assert!(find_record(&webhook_only).transcription.is_none());
        }

        #[test]
        fn test_record_defaults() {
            let doc = voicemail(VoicemailParams::default());

            let record = find_record(&doc);
            assert!(record.beep);
            assert_eq!(record.max_length, 120);
            assert_eq!(record.format, "mp3");
            assert_eq!(record.terminators, "#");
        }
    }

    mod forward_call_tests {
        use crate::document::Action;
        use crate::generator::{forward_call, ForwardCallParams};

        #[test]
        fn test_from_defaults_to_caller_id_placeholder() {
            let doc = forward_call(ForwardCallParams {
                to: "+15559998888".to_string(),
                ..Default::default()
            });

            let main = doc.main().unwrap();
            assert_eq!(main.len(), 1);
            match &main[0] {
                Action::Connect(connect) => {
                    assert_eq!(connect.to.as_deref(), Some("+15559998888"));
                    assert_eq!(connect.from.as_deref(), Some("%{call.from}"));
                    assert_eq!(connect.timeout, 30);
                    assert!(connect.parallel.is_none());
                    assert!(connect.serial.is_none());
                }
                other => panic!("expected connect action, got {:?}", other),
            }
        }

        #[test]
        fn test_announcement_prepends_play() {
            let doc = forward_call(ForwardCallParams {
                to: "+15559998888".to_string(),
                announcement: Some("Connecting you now.".to_string()),
                ..Default::default()
            });

            let main = doc.main().unwrap();
            assert_eq!(main.len(), 2);
            match &main[0] {
                Action::Play(play) => assert_eq!(play.url, "say:Connecting you now."),
                other => panic!("expected play action, got {:?}", other),
            }
        }
    }

    mod validator_tests {
        use crate::generator::{ai_receptionist, voicemail, AiReceptionistParams, VoicemailParams};
        use crate::validator::{validate, validate_value};
        use serde_json::json;

        #[test]
        fn test_empty_document_reports_both_errors() {
            let report = validate_value(&json!({}));

            assert!(!report.valid);
            assert_eq!(report.errors.len(), 2);
            assert!(report.errors.iter().any(|e| e.contains("version")));
            assert!(report.errors.iter().any(|e| e.contains("main")));
        }

        #[test]
        fn test_missing_main_section_only() {
            let report = validate_value(&json!({
                "version": "1.0.0",
                "sections": { "menu": [] }
            }));

            assert!(!report.valid);
            assert_eq!(report.errors.len(), 1);
            assert!(report.errors[0].contains("main"));
        }

        #[test]
        fn test_generated_documents_always_validate() {
            let report = validate(&ai_receptionist(AiReceptionistParams::default()));
            assert!(report.valid);
            assert!(report.errors.is_empty());

            let report = validate(&voicemail(VoicemailParams::default()));
            assert!(report.valid);
        }
    }

    mod serializer_tests {
        use crate::document::{Action, CallFlowDocument};
        use crate::generator::{ai_receptionist, ivr_menu, AiReceptionistParams, IvrMenuParams};
        use crate::serializer::{deserialize, serialize};

        #[test]
        fn test_serialization_is_deterministic() {
            let params = AiReceptionistParams {
                transfer_number: Some("+15551112222".to_string()),
                business_hours: Some("Mon-Fri 9-5".to_string()),
                ..Default::default()
            };

            let first = serialize(&ai_receptionist(params.clone()), false).unwrap();
            let second = serialize(&ai_receptionist(params), false).unwrap();
            assert_eq!(first, second);
        }

        #[test]
        fn test_pretty_output_is_indented() {
            let doc = ivr_menu(IvrMenuParams::default());

            let compact = serialize(&doc, false).unwrap();
            let pretty = serialize(&doc, true).unwrap();
            assert!(!compact.contains('\n'));
            assert!(pretty.contains("\n  "));
        }

        #[test]
        fn test_actions_serialize_verb_keyed() {
            let doc = CallFlowDocument::single_section(vec![
                Action::say("Hello."),
                Action::hangup(),
            ]);

            let text = serialize(&doc, false).unwrap();
            assert!(text.contains(r#"{"play":{"url":"say:Hello."}}"#));
            assert!(text.contains(r#"{"hangup":{}}"#));
        }

        #[test]
        fn test_version_literal() {
            let doc = CallFlowDocument::new();
            let text = serialize(&doc, false).unwrap();
            assert!(text.contains(r#""version":"1.0.0""#));
        }

        #[test]
        fn test_round_trip() {
            let doc = ivr_menu(IvrMenuParams::default());

            let text = serialize(&doc, false).unwrap();
            let parsed = deserialize(&text).unwrap();
            assert_eq!(parsed, doc);
        }
    }
}
