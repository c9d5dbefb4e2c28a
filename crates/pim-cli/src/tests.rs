use super::*;

#[test]
fn parses_normalize_with_several_variants() {
    let cli = Cli::try_parse_from(["pim", "normalize", "2 X 5KG", "500g"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Normalize { variants } => assert_eq!(variants, ["2 X 5KG", "500g"]),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn normalize_requires_a_variant() {
    assert!(Cli::try_parse_from(["pim", "normalize"]).is_err());
}

#[test]
fn parses_clean_defaults() {
    let cli = Cli::try_parse_from(["pim", "clean", "--input", "rows.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Clean {
            workflow: None,
            offline: false,
            ..
        }
    ));
}

#[test]
fn parses_clean_with_workflow_offline() {
    let cli = Cli::try_parse_from([
        "pim",
        "clean",
        "--input",
        "rows.json",
        "--workflow",
        "upload-1",
        "--offline",
    ])
    .unwrap();
    match cli.command {
        Commands::Clean {
            input,
            workflow,
            offline,
        } => {
            assert_eq!(input, PathBuf::from("rows.json"));
            assert_eq!(workflow.as_deref(), Some("upload-1"));
            assert!(offline);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn push_requires_workflow() {
    assert!(Cli::try_parse_from(["pim", "push"]).is_err());
}

#[test]
fn parses_approvals_set_status_with_several_ids() {
    let cli = Cli::try_parse_from(["pim", "approvals", "set-status", "Approved", "a1", "a2"])
        .unwrap();
    match cli.command {
        Commands::Approvals {
            command:
                ApprovalsCommands::SetStatus {
                    status,
                    ids,
                    reason,
                },
        } => {
            assert_eq!(status, pim_core::ApprovalStatus::Approved);
            assert_eq!(ids, ["a1", "a2"]);
            assert!(reason.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_rejection_with_reason() {
    let cli = Cli::try_parse_from([
        "pim",
        "approvals",
        "set-status",
        "rejected",
        "a1",
        "--reason",
        "image is blurry",
    ])
    .unwrap();
    match cli.command {
        Commands::Approvals {
            command: ApprovalsCommands::SetStatus { reason, .. },
        } => assert_eq!(reason.as_deref(), Some("image is blurry")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn set_status_requires_an_id() {
    assert!(Cli::try_parse_from(["pim", "approvals", "set-status", "approved"]).is_err());
}

#[test]
fn rejects_unknown_status() {
    assert!(Cli::try_parse_from(["pim", "approvals", "set-status", "archived", "a1"]).is_err());
}

#[test]
fn parses_bulk_approve() {
    let cli = Cli::try_parse_from(["pim", "approvals", "approve", "a1", "a2", "a3"]).unwrap();
    match cli.command {
        Commands::Approvals {
            command: ApprovalsCommands::Approve { ids },
        } => assert_eq!(ids, ["a1", "a2", "a3"]),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_delete() {
    let cli = Cli::try_parse_from(["pim", "approvals", "delete", "a1"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Approvals {
            command: ApprovalsCommands::Delete { ref id }
        } if id == "a1"
    ));
}

#[test]
fn parses_approvals_publish_with_search() {
    let cli = Cli::try_parse_from(["pim", "approvals", "publish", "--search", "milk"]).unwrap();
    match cli.command {
        Commands::Approvals {
            command: ApprovalsCommands::Publish { search },
        } => assert_eq!(search.as_deref(), Some("milk")),
        other => panic!("unexpected command: {other:?}"),
    }
}
