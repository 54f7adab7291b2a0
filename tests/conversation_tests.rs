use std::io::Write;

use fieldmark::{
    field_values, Adapter, ContentPart, FieldCodec, FieldMarkError, FieldSpec, MarkerChatAdapter,
    Role, Signature,
};

fn qa_signature() -> Signature {
    Signature::new("Answer the question.")
        .with_input("question", FieldSpec::text())
        .with_output("answer", FieldSpec::text())
}

#[test]
fn test_end_to_end_single_demo() {
    let adapter = MarkerChatAdapter::new();
    let demos = vec![field_values! { "question" => "2+2?", "answer" => "4" }];
    let inputs = field_values! { "question" => "3+3?" };

    let messages = adapter.format(&qa_signature(), &demos, &inputs).unwrap();
    assert_eq!(messages.len(), 4);

    assert_eq!(messages[0].role, Role::System);
    assert!(messages[0]
        .text()
        .unwrap()
        .starts_with("Your input fields are:\n1. `question` (str)"));

    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, vec![ContentPart::text("[[[[ #### question #### ]]]]\n2+2?")]);

    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(
        messages[2].text(),
        Some("[[[[ #### answer #### ]]]]\n4\n\n[[[[ #### completed #### ]]]]")
    );

    assert_eq!(messages[3].role, Role::User);
    assert_eq!(messages[3].text(), Some("[[[[ #### question #### ]]]]\n3+3?"));
}

#[test]
fn test_message_count_grows_with_demos() {
    let adapter = MarkerChatAdapter::new();
    let inputs = field_values! { "question" => "3+3?" };

    for n in 0..4 {
        let demos: Vec<_> = (0..n)
            .map(|i| field_values! { "question" => format!("{i}+{i}?"), "answer" => format!("{}", i * 2) })
            .collect();
        let messages = adapter.format(&qa_signature(), &demos, &inputs).unwrap();
        assert_eq!(messages.len(), 2 * n + 2);
        assert_eq!(messages.last().map(|m| m.role), Some(Role::User));
    }
}

#[test]
fn test_parse_completion() {
    let fields = MarkerChatAdapter::new()
        .parse(
            &qa_signature(),
            "[[[[ #### answer #### ]]]]\n4\n\n[[[[ #### completed #### ]]]]\n",
        )
        .unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["answer"], "4");
}

#[test]
fn test_parse_duplicate_marker_keeps_first() {
    let completion = "[[[[ #### answer #### ]]]]\n4\n\n[[[[ #### answer #### ]]]]\n5\n";
    let fields = MarkerChatAdapter::new()
        .parse(&qa_signature(), completion)
        .unwrap();
    assert_eq!(fields["answer"], "4");
}

#[test]
fn test_parse_missing_output_reports_keys() {
    let sig = qa_signature().with_output("confidence", FieldSpec::new("float"));
    let err = MarkerChatAdapter::new()
        .parse(&sig, "[[[[ #### answer #### ]]]]\n4\n\n[[[[ #### completed #### ]]]]")
        .unwrap_err();

    match err {
        FieldMarkError::Parse { expected, actual } => {
            assert_eq!(expected, vec!["answer", "confidence"]);
            assert_eq!(actual, vec!["answer", "completed"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_assistant_turn_round_trips_through_parse() {
    let sig = Signature::new("Summarise.")
        .with_input("document", FieldSpec::text())
        .with_output("reasoning", FieldSpec::text())
        .with_output("summary", FieldSpec::text());
    let demo = field_values! {
        "document" => "Rust is a systems language.\nIt has no GC.",
        "reasoning" => "Two facts.\n\nBoth short.",
        "summary" => "Rust: systems, no GC.",
    };
    let inputs = field_values! { "document" => "..." };

    let adapter = MarkerChatAdapter::new();
    let messages = adapter.format(&sig, &[demo], &inputs).unwrap();
    let fields = adapter.parse(&sig, messages[2].text().unwrap()).unwrap();

    assert_eq!(fields["reasoning"], "Two facts.\n\nBoth short.");
    assert_eq!(fields["summary"], "Rust: systems, no GC.");
}

#[test]
fn test_marker_inside_value_is_misparsed() {
    let text = FieldCodec::render([("answer", "see below\n[[[[ #### note #### ]]]]\nsurprise")]);
    let fields = FieldCodec::parse(&text, &["answer", "note"]).unwrap();
    assert_eq!(fields["answer"], "see below");
    assert_eq!(fields["note"], "surprise");
}

#[test]
fn test_image_demo_produces_image_parts_first() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"ABC").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let sig = Signature::new("Describe the picture.")
        .with_input("image", FieldSpec::new("Image"))
        .with_input("question", FieldSpec::text())
        .with_output("caption", FieldSpec::text());
    let demos = vec![field_values! {
        "image" => path.as_str(),
        "question" => "what is it?",
        "caption" => "letters",
    }];
    let inputs = field_values! { "image" => "", "question" => "and now?" };

    let messages = MarkerChatAdapter::new()
        .format(&sig, &demos, &inputs)
        .unwrap();

    assert_eq!(
        messages[1].content,
        vec![
            ContentPart::image_url("data:image/jpeg;base64,QUJD"),
            ContentPart::text("[[[[ #### question #### ]]]]\nwhat is it?"),
        ]
    );
    assert_eq!(messages[3].content.len(), 1);
    assert!(!messages[3].content[0].is_image());
}

#[test]
fn test_format_fails_without_partial_output() {
    let sig = Signature::new("Describe.")
        .with_input("image", FieldSpec::new("Image"))
        .with_output("caption", FieldSpec::text());
    let inputs = field_values! { "image" => serde_json::json!(7) };

    let err = MarkerChatAdapter::new().format(&sig, &[], &inputs).unwrap_err();
    match err {
        FieldMarkError::ImageEncode { field, .. } => assert_eq!(field, "image"),
        other => panic!("unexpected error: {other:?}"),
    }
}
