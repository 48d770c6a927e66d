use spice::conversation::{
    Command, ConversationState, Conversations, Input, SummaryRequest, Transition,
};

const CHAT: i64 = 42;

#[test]
fn test_input_parsing() {
    assert_eq!(Input::parse("/start"), Input::Command(Command::Start));
    assert_eq!(Input::parse("/summarize"), Input::Command(Command::Summarize));
    assert_eq!(Input::parse("/cancel@SpiceBot"), Input::Command(Command::Cancel));
    assert_eq!(Input::parse("/Help extra words"), Input::Command(Command::Help));
    assert_eq!(
        Input::parse("/weather"),
        Input::Command(Command::Other("weather".to_string()))
    );
    assert_eq!(Input::parse("Kid"), Input::Text("Kid"));
    assert_eq!(Input::parse("/"), Input::Text("/"));
    assert_eq!(Input::parse("/ hello"), Input::Text("/ hello"));
    assert_eq!(Input::parse("/\tcancel"), Input::Text("/\tcancel"));
    assert_eq!(
        Input::parse("https://example.com/a"),
        Input::Text("https://example.com/a")
    );
}

#[test]
fn test_full_flow_returns_to_idle() {
    let mut conversations = Conversations::new();

    assert_eq!(
        conversations.handle(CHAT, Input::parse("/summarize")),
        Transition::AskAudience
    );
    assert_eq!(conversations.state(CHAT), ConversationState::SelectingAudience);

    assert_eq!(
        conversations.handle(CHAT, Input::parse("Engineer")),
        Transition::AskContent {
            audience: "Engineer".to_string()
        }
    );
    assert_eq!(
        conversations.state(CHAT),
        ConversationState::ProcessingContent {
            audience: "Engineer".to_string()
        }
    );

    assert_eq!(
        conversations.handle(CHAT, Input::parse("Some article text")),
        Transition::Process(SummaryRequest {
            raw_input: "Some article text".to_string(),
            audience: "Engineer".to_string(),
        })
    );
    assert_eq!(conversations.state(CHAT), ConversationState::Idle);
    assert_eq!(conversations.active(), 0);
}

#[test]
fn test_unrecognised_audience_is_stored_verbatim() {
    let mut conversations = Conversations::new();
    conversations.handle(CHAT, Input::parse("/summarize"));

    assert_eq!(
        conversations.handle(CHAT, Input::parse("Astronaut Grandma")),
        Transition::AskContent {
            audience: "Astronaut Grandma".to_string()
        }
    );
}

#[test]
fn test_cancel_from_each_active_state() {
    let mut conversations = Conversations::new();

    conversations.handle(CHAT, Input::parse("/summarize"));
    assert_eq!(
        conversations.handle(CHAT, Input::parse("/cancel")),
        Transition::Cancelled
    );
    assert_eq!(conversations.state(CHAT), ConversationState::Idle);

    conversations.handle(CHAT, Input::parse("/summarize"));
    conversations.handle(CHAT, Input::parse("Kid"));
    assert_eq!(
        conversations.handle(CHAT, Input::parse("/cancel")),
        Transition::Cancelled
    );
    assert_eq!(conversations.state(CHAT), ConversationState::Idle);

    // The cancelled audience does not carry over
    conversations.handle(CHAT, Input::parse("/summarize"));
    assert_eq!(conversations.state(CHAT), ConversationState::SelectingAudience);
}

#[test]
fn test_idle_ignores_text_and_cancel() {
    let mut conversations = Conversations::new();

    assert_eq!(conversations.handle(CHAT, Input::parse("hello")), Transition::Ignore);
    assert_eq!(conversations.handle(CHAT, Input::parse("/cancel")), Transition::Ignore);
    assert_eq!(conversations.active(), 0);
}

#[test]
fn test_start_does_not_change_state() {
    let mut conversations = Conversations::new();
    conversations.handle(CHAT, Input::parse("/summarize"));

    assert_eq!(conversations.handle(CHAT, Input::parse("/start")), Transition::Welcome);
    assert_eq!(conversations.state(CHAT), ConversationState::SelectingAudience);
}

#[test]
fn test_other_commands_are_not_content() {
    let mut conversations = Conversations::new();
    conversations.handle(CHAT, Input::parse("/summarize"));

    assert_eq!(conversations.handle(CHAT, Input::parse("/weather")), Transition::Ignore);
    assert_eq!(conversations.state(CHAT), ConversationState::SelectingAudience);

    conversations.handle(CHAT, Input::parse("Kid"));
    assert_eq!(conversations.handle(CHAT, Input::parse("/weather")), Transition::Ignore);
    assert_eq!(
        conversations.state(CHAT),
        ConversationState::ProcessingContent {
            audience: "Kid".to_string()
        }
    );
}

#[test]
fn test_summarize_restarts_selection() {
    let mut conversations = Conversations::new();
    conversations.handle(CHAT, Input::parse("/summarize"));
    conversations.handle(CHAT, Input::parse("Scientist"));

    assert_eq!(
        conversations.handle(CHAT, Input::parse("/summarize")),
        Transition::AskAudience
    );
    assert_eq!(conversations.state(CHAT), ConversationState::SelectingAudience);
}

#[test]
fn test_sessions_are_independent() {
    let mut conversations = Conversations::new();

    conversations.handle(1, Input::parse("/summarize"));
    conversations.handle(1, Input::parse("Kid"));
    conversations.handle(2, Input::parse("/summarize"));
    conversations.handle(2, Input::parse("Scientist"));

    assert_eq!(
        conversations.handle(1, Input::parse("text one")),
        Transition::Process(SummaryRequest {
            raw_input: "text one".to_string(),
            audience: "Kid".to_string(),
        })
    );
    assert_eq!(
        conversations.state(2),
        ConversationState::ProcessingContent {
            audience: "Scientist".to_string()
        }
    );
    assert_eq!(conversations.active(), 1);
}
