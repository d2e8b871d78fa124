mod common;
use common::{Calls, RecordingClient, channel_msg, private_msg, recorder};
use slirc_cmd::{ArgType, CommandEntry, Dispatcher, Visibility};

fn dispatcher() -> Dispatcher {
    Dispatcher::new(RecordingClient::new())
}

#[test]
fn test_longer_subcommand_wins_over_prefix_command() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("sub", recorder(&calls, "sub")));
    d.add_command(CommandEntry::new("sub action", recorder(&calls, "sub action")));

    let msg = channel_msg("!sub action x");
    d.run_commands(&msg, &msg.text, false)?;
    assert_eq!(
        calls.take(),
        vec![("sub action".to_string(), vec!["x".to_string()])]
    );

    // Registration order doesn't matter for the longer name.
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("sub action", recorder(&calls, "sub action")));
    d.add_command(CommandEntry::new("sub", recorder(&calls, "sub")));
    d.run_commands(&msg, &msg.text, false)?;
    assert_eq!(calls.labels(), vec!["sub action"]);
    Ok(())
}

#[test]
fn test_shorter_command_still_receives_other_words() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("sub", recorder(&calls, "sub")));
    d.add_command(CommandEntry::new("sub action", recorder(&calls, "sub action")));

    let msg = channel_msg("!sub other thing");
    d.run_commands(&msg, &msg.text, false)?;
    assert_eq!(
        calls.take(),
        vec![(
            "sub".to_string(),
            vec!["other".to_string(), "thing".to_string()]
        )]
    );
    Ok(())
}

#[test]
fn test_case_sensitive_entry_rejects_other_case() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("Foo", recorder(&calls, "sensitive")).case_sensitive(true));

    let msg = channel_msg("!foo");
    d.run_commands(&msg, &msg.text, false)?;
    assert!(calls.take().is_empty());

    let msg = channel_msg("!Foo");
    d.run_commands(&msg, &msg.text, false)?;
    assert_eq!(calls.labels(), vec!["sensitive"]);
    Ok(())
}

#[test]
fn test_case_insensitive_entry_accepts_other_case() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("Foo", recorder(&calls, "insensitive")));

    let msg = channel_msg("!fOO bar");
    d.run_commands(&msg, &msg.text, false)?;
    assert_eq!(
        calls.take(),
        vec![("insensitive".to_string(), vec!["bar".to_string()])]
    );
    Ok(())
}

#[test]
fn test_visibility_policies() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("pm", recorder(&calls, "pm")).visibility(Visibility::PmOnly));
    d.add_command(
        CommandEntry::new("chan", recorder(&calls, "chan")).visibility(Visibility::ChannelOnly),
    );
    d.add_command(CommandEntry::new("any", recorder(&calls, "any")));

    for text in ["!pm", "!chan", "!any"] {
        let msg = channel_msg(text);
        d.run_commands(&msg, &msg.text, false)?;
    }
    assert_eq!(calls.labels(), vec!["chan", "any"]);
    calls.take();

    for text in ["!pm", "!chan", "!any"] {
        let msg = private_msg(text);
        d.run_commands(&msg, &msg.text, true)?;
    }
    assert_eq!(calls.labels(), vec!["pm", "any"]);
    Ok(())
}

#[test]
fn test_prefix_override_and_no_match() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("dot", recorder(&calls, "dot")).prefix_override("."));

    for text in ["!dot", "dot", ".dotty", "hello .dot"] {
        let msg = channel_msg(text);
        d.run_commands(&msg, &msg.text, false)?;
    }
    assert!(calls.take().is_empty());

    let msg = channel_msg(".dot a");
    d.run_commands(&msg, &msg.text, false)?;
    assert_eq!(calls.take(), vec![("dot".to_string(), vec!["a".to_string()])]);
    Ok(())
}

#[test]
fn test_arg_types_shape_arguments() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("one", recorder(&calls, "one")).arg_type(ArgType::One));
    d.add_command(CommandEntry::new("auto", recorder(&calls, "auto")));
    d.add_command(CommandEntry::new("spaces", recorder(&calls, "spaces")).arg_type(ArgType::Spaces));
    d.add_command(CommandEntry::new("pipes", recorder(&calls, "pipes")).arg_type(ArgType::Pipes));

    for text in [
        r#"!one a | "b c""#,
        "!auto a | b c",
        r#"!auto a "b c""#,
        "!spaces a | b",
        "!pipes a b",
        "!auto",
    ] {
        let msg = channel_msg(text);
        d.run_commands(&msg, &msg.text, false)?;
    }

    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let got: Vec<Vec<String>> = calls.take().into_iter().map(|(_, args)| args).collect();
    assert_eq!(
        got,
        vec![
            strings(&[r#"a | "b c""#]),
            strings(&["a", "b c"]),
            strings(&["a", "b c"]),
            strings(&["a", "|", "b"]),
            strings(&["a b"]),
            strings(&[]),
        ]
    );
    Ok(())
}

#[test]
fn test_run_command_by_id_skips_matching() {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("ping", recorder(&calls, "ping")).id("core.ping"));

    d.run_command("core.ping", &channel_msg("!ping a b"));
    d.run_command("missing", &channel_msg("!ping"));
    assert_eq!(
        calls.take(),
        vec![(
            "ping".to_string(),
            vec!["a".to_string(), "b".to_string()]
        )]
    );
}

#[test]
fn test_handlers_can_invoke_other_commands() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("inner", recorder(&calls, "inner")));
    d.add_command(CommandEntry::new("outer", |ctx, _args| {
        ctx.dispatcher.run_command("inner", &ctx.message.with_text("!inner nested"));
        Ok(())
    }));

    let msg = channel_msg("!outer");
    d.run_commands(&msg, &msg.text, false)?;
    assert_eq!(
        calls.take(),
        vec![("inner".to_string(), vec!["nested".to_string()])]
    );
    Ok(())
}

#[test]
fn test_command_stats_count_invocations() -> anyhow::Result<()> {
    let calls = Calls::default();
    let mut d = dispatcher();
    d.add_command(CommandEntry::new("a", recorder(&calls, "a")));
    d.add_command(CommandEntry::new("b", recorder(&calls, "b")));
    d.add_command(CommandEntry::new("c", recorder(&calls, "c")));

    for text in ["!b", "!a", "!b", "!nothing"] {
        let msg = channel_msg(text);
        d.run_commands(&msg, &msg.text, false)?;
    }
    assert_eq!(
        d.command_stats(),
        vec![("b".to_string(), 2), ("a".to_string(), 1)]
    );
    Ok(())
}
