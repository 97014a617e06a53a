mod utils;
use utils::{RecordFileBuilder, TestStoreBuilder};

use std::io::Cursor;

use matchday::{
    attach_photos, codec,
    cli::{App, Command, PhotosCommand, Target},
    discover_photos,
    platform::{PlatformCall, RecordingPlatform},
    record::AttachReport,
    update_info, Aggregator, InfoPatch, MatchSession, NewRecord, RecordBuilder, RecordError,
    RecordStore,
};

fn new_record(date: &str, opponent: &str) -> NewRecord {
    NewRecord {
        date: date.to_string(),
        opponent: opponent.to_string(),
        score: "3-2".to_string(),
        location: "福沁球场".to_string(),
        attendance: vec!["东哥".to_string(), "小王".to_string()],
        title: None,
    }
}

fn run(app: &App, command: Command) -> String {
    let mut input = Cursor::new(Vec::new());
    let mut out = Vec::new();
    app.execute(command, &mut input, &mut out)
        .expect("command should succeed");
    String::from_utf8(out).expect("utf-8 output")
}

#[test]
fn created_record_is_stored_under_its_identity() {
    let setup = TestStoreBuilder::new().build();
    let mut store = setup.store();

    let record = RecordBuilder::default()
        .create_record(new_record("2025-01-12", "党校队"))
        .unwrap();
    let file = store.save(&record, false).unwrap();

    assert_eq!(file, "2025-01-12-党校队.md");
    assert!(store.exists("2025-01-12", "党校队").unwrap());

    let text = setup.read_record(&file);
    assert!(text.starts_with("---\n"));
    assert!(text.contains("photos: []"));
    assert!(text.contains("scorers: []"));
    assert_eq!(codec::decode(&text).unwrap(), record);
}

#[test]
fn duplicate_record_needs_overwrite() {
    let setup = TestStoreBuilder::new().build();
    let mut store = setup.store();
    let builder = RecordBuilder::default();

    store
        .save(&builder.create_record(new_record("2025-01-12", "党校队")).unwrap(), false)
        .unwrap();

    let mut second = new_record("2025-01-12", "党校队");
    second.score = "1-1".to_string();
    let second = builder.create_record(second).unwrap();

    let result = store.save(&second, false);
    assert!(matches!(result, Err(RecordError::DuplicateRecord { .. })));

    store.save(&second, true).unwrap();
    let reloaded = store.load("2025-01-12", "党校队").unwrap();
    assert_eq!(reloaded.frontmatter.score.as_deref(), Some("1-1"));
}

#[test]
fn attaching_discovered_photos_is_idempotent() {
    let setup = TestStoreBuilder::new()
        .with_record(RecordFileBuilder::new("2025-01-12", "党校队").body("\n原文\n\n---\n尾巴\n"))
        .with_photos("2025-01-12", &["b.jpg", "a.png", "notes.txt"])
        .build();
    let store = setup.store();
    let record = store.load("2025-01-12", "党校队").unwrap();

    let assets = discover_photos(setup.root(), "2025-01-12").unwrap();
    let (once, report) = attach_photos(&record, &assets, None);
    let (twice, second_report) = attach_photos(&once, &assets, None);

    assert_eq!(report, AttachReport::Added(2));
    assert_eq!(second_report, AttachReport::AlreadyAttached);
    assert_eq!(once, twice);
    assert_eq!(
        once.photos()
            .iter()
            .map(|photo| photo.path.as_str())
            .collect::<Vec<_>>(),
        vec!["photos/2025-01-12/a.png", "photos/2025-01-12/b.jpg"]
    );
    assert_eq!(once.body, record.body);
}

#[test]
fn missing_photo_directory_means_no_candidates() {
    let setup = TestStoreBuilder::new()
        .with_record(RecordFileBuilder::new("2025-01-12", "党校队"))
        .build();
    let record = setup.store().load("2025-01-12", "党校队").unwrap();

    let assets = discover_photos(setup.root(), "2025-01-12").unwrap();
    let (unchanged, report) = attach_photos(&record, &assets, None);

    assert_eq!(report, AttachReport::NoCandidates);
    assert_eq!(unchanged, record);
}

#[test]
fn legacy_photo_strings_are_normalized_on_save() {
    let setup = TestStoreBuilder::new()
        .with_record(
            RecordFileBuilder::new("2025-01-12", "党校队")
                .photo_paths(&["photos/2025-01-12/old.jpg"]),
        )
        .build();
    let mut store = setup.store();
    let record = store.load("2025-01-12", "党校队").unwrap();

    let updated = update_info(
        &record,
        InfoPatch {
            mvp: Some("东哥".to_string()),
            ..InfoPatch::default()
        },
    );
    store.save(&updated, true).unwrap();

    let text = setup.read_record("2025-01-12-党校队.md");
    assert!(text.contains("path: photos/2025-01-12/old.jpg"));
    assert!(text.contains("caption: ''"));
    assert!(text.ends_with("\n比赛详情\n"));
}

#[test]
fn session_finish_writes_to_filesystem_store() {
    let setup = TestStoreBuilder::new().build();
    let mut store = setup.store();

    let mut session = MatchSession::default();
    session.start("2025-02-02", "内战").unwrap();
    session.append_text("红队 5-4 蓝队").unwrap();
    session.add_photo("photo-001.jpg", "").unwrap();
    let file = session.finish(&mut store, false).unwrap();

    let saved = store.load_file(&file).unwrap();
    assert_eq!(saved.photos().len(), 1);
    assert!(saved.body.contains("红队 5-4 蓝队"));
}

#[test]
fn cli_creates_attaches_and_updates() {
    let setup = TestStoreBuilder::new()
        .with_photos("2025-03-01", &["photo-001.jpg", "photo-002.jpg"])
        .build();
    let app = App::new(setup.config(), Box::new(RecordingPlatform::new()));

    run(
        &app,
        Command::New {
            opponent: "党校队".to_string(),
            date: Some("2025-03-01".to_string()),
            score: "2-0".to_string(),
            location: "福沁球场".to_string(),
            attendance: "东哥, 小王，辉哥".to_string(),
            title: None,
            force: false,
        },
    );
    let output = run(
        &app,
        Command::Photos {
            command: PhotosCommand::Add {
                target: Target::default(),
                captions: vec!["开球".to_string()],
            },
        },
    );
    assert!(output.contains("2"));
    run(
        &app,
        Command::Info {
            target: Target {
                date: Some("2025-03-01".to_string()),
                opponent: Some("党校队".to_string()),
            },
            location: None,
            score: None,
            mvp: Some("辉哥".to_string()),
        },
    );

    let record = setup.store().load("2025-03-01", "党校队").unwrap();
    assert_eq!(record.attendance(), ["东哥", "小王", "辉哥"]);
    assert_eq!(record.mvp(), Some("辉哥"));
    assert_eq!(record.photos()[0].caption, "开球");
    assert_eq!(record.photos()[1].caption, "");
}

#[test]
fn cli_edits_write_back_to_the_file_they_read() {
    // Frontmatter opponent disagrees with the filename after a hand edit
    let setup = TestStoreBuilder::new()
        .with_photos("2025-01-12", &["photo-001.jpg"])
        .build();
    let body = "\n手写的正文，不能被改动。\n\n---\n\n结尾\n";
    setup.write_raw(
        "2025-01-12-党校队.md",
        &format!("---\ndate: \"2025-01-12\"\nopponent: \"党校\"\nattendance:\n  - \"A\"\n---\n{}", body),
    );
    let app = App::new(setup.config(), Box::new(RecordingPlatform::new()));
    let target = Target {
        date: Some("2025-01-12".to_string()),
        opponent: Some("党校队".to_string()),
    };

    run(
        &app,
        Command::Info {
            target: target.clone(),
            location: None,
            score: None,
            mvp: Some("A".to_string()),
        },
    );
    run(
        &app,
        Command::Photos {
            command: PhotosCommand::Add {
                target,
                captions: vec![],
            },
        },
    );

    let store = setup.store();
    assert_eq!(store.list().unwrap(), vec!["2025-01-12-党校队.md"]);
    let record = store.load_file("2025-01-12-党校队.md").unwrap();
    assert_eq!(record.mvp(), Some("A"));
    assert_eq!(record.opponent(), Some("党校"));
    assert_eq!(record.photos().len(), 1);
    assert_eq!(record.body, body);

    let snapshot = Aggregator::default().aggregate(&store).unwrap();
    assert_eq!(snapshot.stats.total_matches, 1);
    assert_eq!(snapshot.stats.attendance.get("A"), 1);
}

#[test]
fn cli_updates_record_without_opponent_key() {
    let setup = TestStoreBuilder::new()
        .with_photos("2025-01-12", &["photo-001.jpg"])
        .build();
    setup.write_raw("2025-01-12-党校队.md", "---\nscore: \"1-0\"\n---\n正文\n");
    let app = App::new(setup.config(), Box::new(RecordingPlatform::new()));

    run(
        &app,
        Command::Info {
            target: Target::default(),
            location: Some("福沁球场".to_string()),
            score: None,
            mvp: None,
        },
    );
    // No date in the frontmatter either: the photo folder comes from the filename
    run(
        &app,
        Command::Photos {
            command: PhotosCommand::Add {
                target: Target::default(),
                captions: vec![],
            },
        },
    );

    let store = setup.store();
    assert_eq!(store.list().unwrap(), vec!["2025-01-12-党校队.md"]);
    let record = store.load_file("2025-01-12-党校队.md").unwrap();
    assert_eq!(record.frontmatter.location.as_deref(), Some("福沁球场"));
    assert_eq!(record.photos()[0].path, "photos/2025-01-12/photo-001.jpg");
    assert_eq!(record.body, "正文\n");
}

#[test]
fn cli_refuses_duplicate_without_force() {
    let setup = TestStoreBuilder::new()
        .with_record(RecordFileBuilder::new("2025-01-12", "党校队"))
        .build();
    let app = App::new(setup.config(), Box::new(RecordingPlatform::new()));

    let mut input = Cursor::new(Vec::new());
    let mut out = Vec::new();
    let result = app.execute(
        Command::New {
            opponent: "党校队".to_string(),
            date: Some("2025-01-12".to_string()),
            score: String::new(),
            location: String::new(),
            attendance: String::new(),
            title: None,
            force: false,
        },
        &mut input,
        &mut out,
    );

    assert!(result.is_err());
    assert!(setup.read_record("2025-01-12-党校队.md").contains("比赛详情"));
}

#[test]
fn cli_draft_reads_commands_from_input() {
    let setup = TestStoreBuilder::new().build();
    let app = App::new(setup.config(), Box::new(RecordingPlatform::new()));

    let script = "/new 党校队 2025-04-06\n上半场 23分钟 东哥 破门\n/info 福沁球场 1-0 东哥\n/hints\n/finish\n";
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    app.execute(Command::Draft, &mut input, &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("23' 东哥"));

    let record = setup.store().load("2025-04-06", "党校队").unwrap();
    assert_eq!(record.mvp(), Some("东哥"));
    assert_eq!(record.frontmatter.location.as_deref(), Some("福沁球场"));
    assert!(record.scorers().is_empty());
    assert!(record.body.contains("上半场 23分钟 东哥 破门"));
}

#[test]
fn cli_preview_goes_through_platform() {
    let setup = TestStoreBuilder::new()
        .with_record(RecordFileBuilder::new("2025-01-12", "党校队"))
        .build();
    let platform = std::sync::Arc::new(RecordingPlatform::new());
    let app = App::new(setup.config(), Box::new(SharedPlatform(platform.clone())));

    run(
        &app,
        Command::Preview {
            target: Target::default(),
            copy: true,
        },
    );

    let calls = platform.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], PlatformCall::Clipboard(html) if html.contains("<h1>")));
    let expected = setup.config().output_path().join("2025-01-12-党校队.html");
    assert_eq!(calls[1], PlatformCall::Open(expected.clone()));
    assert!(expected.is_file());
}

/// Lets the test keep a handle on the platform the app owns
struct SharedPlatform(std::sync::Arc<RecordingPlatform>);

impl matchday::platform::PlatformService for SharedPlatform {
    fn deploy(&self, dir: &std::path::Path) -> Result<(), matchday::platform::PlatformError> {
        self.0.deploy(dir)
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), matchday::platform::PlatformError> {
        self.0.copy_to_clipboard(text)
    }

    fn open_in_browser(&self, path: &std::path::Path) -> Result<(), matchday::platform::PlatformError> {
        self.0.open_in_browser(path)
    }
}
