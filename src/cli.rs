use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::hints::{apply_suggestions, RegexRosterHints, RegexScorerHints, RosterHints, ScorerHints};
use crate::photos::{discover_photos, import_photos};
use crate::platform::{CommandPlatform, PlatformService, RecordingPlatform};
use crate::record::{
    attach_photos, date_from_file_name, parse_roster, record_file_name, update_info,
    AttachReport, BuiltinTemplate, FileTemplate, FsRecordStore, InfoPatch, MatchRecord, NewRecord,
    RecordBuilder, RecordStore, TemplateProvider, RECORD_EXTENSION,
};
use crate::render::{render_site, HtmlRenderer, Renderer};
use crate::session::{commands::HELP, DraftCommand, MatchSession, SessionState};
use crate::shared::{AppConfig, AppError};
use crate::stats::{Aggregator, FsStatsRepository, ScanPolicy};

#[derive(Parser, Debug)]
#[command(name = "matchday", author, version, about = "Match report records for a hobby soccer club", long_about = None)]
pub struct Cli {
    /// Store root holding matches/, photos/ and stats/
    #[arg(long, env = "MATCHDAY_ROOT", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Markdown skeleton used for new records
    #[arg(long, env = "MATCHDAY_TEMPLATE", global = true)]
    pub template: Option<PathBuf>,

    /// Club name shown in reports and pages
    #[arg(long, env = "MATCHDAY_CLUB", global = true)]
    pub club: Option<String>,

    /// Log platform calls (deploy, clipboard, browser) instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new match record
    New {
        #[arg(long)]
        opponent: String,
        /// Match date, defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        score: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Names separated by commas or spaces
        #[arg(long, default_value = "")]
        attendance: String,
        #[arg(long)]
        title: Option<String>,
        /// Replace an existing record with the same date and opponent
        #[arg(long)]
        force: bool,
    },
    /// Manage match photos
    Photos {
        #[command(subcommand)]
        command: PhotosCommand,
    },
    /// Update location, score or MVP of a record (the newest by default)
    Info {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        score: Option<String>,
        #[arg(long)]
        mvp: Option<String>,
    },
    /// Recompute stats/stats.json and stats/stats.md
    Stats {
        /// Leave unreadable records out instead of failing
        #[arg(long)]
        skip_bad: bool,
    },
    /// Render every record to HTML
    Render,
    /// Render a single record, open it, and optionally copy its HTML
    Preview {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        copy: bool,
    },
    /// Render the site and deploy the output directory
    Deploy,
    /// Suggest goal scorers from a record's text
    Hints {
        #[command(flatten)]
        target: Target,
        /// Write the suggestions into the record's scorers
        #[arg(long)]
        apply: bool,
    },
    /// Draft a report line by line from standard input
    Draft,
}

#[derive(Subcommand, Debug)]
pub enum PhotosCommand {
    /// Attach photos found under photos/{date}/ to a record
    Add {
        #[command(flatten)]
        target: Target,
        /// Captions in filename order
        #[arg(long = "caption")]
        captions: Vec<String>,
    },
    /// Copy images from a folder into photos/{date}/ as photo-NNN files
    Import {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        date: String,
    },
}

/// Selects a record by identity; both unset means the newest record
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Target {
    #[arg(long, requires = "opponent")]
    pub date: Option<String>,
    #[arg(long, requires = "date")]
    pub opponent: Option<String>,
}

impl Cli {
    pub fn config(&self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            root: self.root.clone(),
            club_name: self.club.clone().unwrap_or(defaults.club_name),
            template: self.template.clone(),
            ..defaults
        }
    }
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    let platform: Box<dyn PlatformService> = if cli.dry_run {
        Box::new(RecordingPlatform::new())
    } else {
        Box::new(CommandPlatform::default())
    };
    let app = App::new(cli.config(), platform);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout().lock();
    app.execute(cli.command, &mut input, &mut output)
}

/// Command dispatch over a configured store
pub struct App {
    config: AppConfig,
    platform: Box<dyn PlatformService>,
}

impl App {
    pub fn new(config: AppConfig, platform: Box<dyn PlatformService>) -> Self {
        Self { config, platform }
    }

    pub fn execute(
        &self,
        command: Command,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        match command {
            Command::New {
                opponent,
                date,
                score,
                location,
                attendance,
                title,
                force,
            } => {
                let new = NewRecord {
                    date: date.unwrap_or_else(today),
                    opponent,
                    score,
                    location,
                    attendance: parse_roster(&attendance),
                    title,
                };
                self.create(new, force, out)
            }
            Command::Photos { command } => match command {
                PhotosCommand::Add { target, captions } => self.add_photos(&target, &captions, out),
                PhotosCommand::Import { source, date } => {
                    let imported = import_photos(&source, &self.config.root, &date)?;
                    writeln!(out, "导入 {} 张照片到 photos/{}/", imported.len(), date)?;
                    Ok(())
                }
            },
            Command::Info {
                target,
                location,
                score,
                mvp,
            } => self.update_info(&target, InfoPatch { location, score, mvp }, out),
            Command::Stats { skip_bad } => self.stats(skip_bad, out),
            Command::Render => {
                let pages = self.render_all()?;
                writeln!(out, "生成 {} 个页面: {}", pages, self.config.output_path().display())?;
                Ok(())
            }
            Command::Preview { target, copy } => self.preview(&target, copy, out),
            Command::Deploy => {
                self.render_all()?;
                self.platform.deploy(&self.config.output_path())?;
                writeln!(out, "已部署 {}", self.config.output_path().display())?;
                Ok(())
            }
            Command::Hints { target, apply } => self.hints(&target, apply, out),
            Command::Draft => self.draft(input, out),
        }
    }

    fn store(&self) -> FsRecordStore {
        FsRecordStore::new(&self.config.root)
    }

    fn template(&self) -> Box<dyn TemplateProvider> {
        match &self.config.template {
            Some(path) => Box::new(FileTemplate::new(path.clone())),
            None => Box::new(BuiltinTemplate),
        }
    }

    fn builder(&self) -> RecordBuilder {
        RecordBuilder::new(self.template())
    }

    fn create(&self, new: NewRecord, force: bool, out: &mut dyn Write) -> Result<(), AppError> {
        let mut store = self.store();
        if store.exists(&new.date, &new.opponent)? && !force {
            return Err(AppError::Usage(format!(
                "{}-{}.{} already exists, pass --force to overwrite",
                new.date, new.opponent, RECORD_EXTENSION
            )));
        }

        let record = self.builder().create_record(new)?;
        let file = store.save(&record, force)?;
        writeln!(out, "已创建 {}", store.path_of(&file).display())?;
        Ok(())
    }

    /// Loads the targeted record along with the file it was read from.
    /// Edits are written back to that file, never to a name rebuilt from
    /// the frontmatter.
    fn resolve(&self, store: &FsRecordStore, target: &Target) -> Result<(String, MatchRecord), AppError> {
        match (&target.date, &target.opponent) {
            (Some(date), Some(opponent)) => {
                let file = record_file_name(date, opponent);
                let record = store.load_file(&file)?;
                Ok((file, record))
            }
            _ => store
                .latest()?
                .ok_or_else(|| AppError::Usage("No match records found".to_string())),
        }
    }

    fn add_photos(
        &self,
        target: &Target,
        captions: &[String],
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut store = self.store();
        let (file, record) = self.resolve(&store, target)?;
        let date = date_from_file_name(&file)
            .or_else(|| record.date())
            .ok_or_else(|| AppError::Usage(format!("{} has no date", file)))?
            .to_string();

        let assets = discover_photos(&self.config.root, &date)?;
        let captions = (!captions.is_empty()).then_some(captions);
        let (updated, report) = attach_photos(&record, &assets, captions);

        match report {
            AttachReport::NoCandidates => {
                writeln!(out, "photos/{}/ 下没有照片", date)?;
            }
            AttachReport::AlreadyAttached => {
                writeln!(out, "照片已全部添加到 {}", file)?;
            }
            AttachReport::Added(count) => {
                store.save_file(&file, &updated)?;
                writeln!(out, "添加 {} 张照片到 {}", count, file)?;
            }
        }
        Ok(())
    }

    fn update_info(&self, target: &Target, patch: InfoPatch, out: &mut dyn Write) -> Result<(), AppError> {
        if patch.is_empty() {
            return Err(AppError::Usage(
                "Nothing to update: pass --location, --score or --mvp".to_string(),
            ));
        }
        let mut store = self.store();
        let (file, record) = self.resolve(&store, target)?;
        let updated = update_info(&record, patch);
        store.save_file(&file, &updated)?;
        writeln!(out, "已更新 {}", file)?;
        Ok(())
    }

    fn stats(&self, skip_bad: bool, out: &mut dyn Write) -> Result<(), AppError> {
        let policy = if skip_bad {
            ScanPolicy::SkipAndWarn
        } else {
            ScanPolicy::FailFast
        };
        let aggregator = Aggregator::builder().with_policy(policy).build();
        let mut repository = FsStatsRepository::new(&self.config.root);

        let snapshot = aggregator.refresh(&self.store(), &mut repository, &self.config.club_name)?;
        for file in &snapshot.skipped {
            writeln!(out, "跳过无法解析的记录: {}", file)?;
        }
        write!(
            out,
            "{}",
            crate::stats::render_markdown(&snapshot, &self.config.club_name)
        )?;
        writeln!(out, "已写入 {}", repository.json_path().display())?;
        Ok(())
    }

    fn renderer(&self) -> HtmlRenderer {
        HtmlRenderer::new().with_club_name(self.config.club_name.clone())
    }

    fn render_all(&self) -> Result<usize, AppError> {
        let pages = render_site(&self.store(), &self.renderer(), &self.config.output_path())?;
        Ok(pages.len())
    }

    fn preview(&self, target: &Target, copy: bool, out: &mut dyn Write) -> Result<(), AppError> {
        let store = self.store();
        let (file, record) = self.resolve(&store, target)?;
        let renderer = self.renderer();
        let html = renderer.render_record(&record);

        let output_dir = self.config.output_path();
        fs::create_dir_all(&output_dir)?;
        let stem = file
            .strip_suffix(&format!(".{}", RECORD_EXTENSION))
            .unwrap_or(&file);
        let page = output_dir.join(format!("{}.{}", stem, renderer.extension()));
        fs::write(&page, &html)?;

        if copy {
            self.platform.copy_to_clipboard(&html)?;
            writeln!(out, "HTML 已复制到剪贴板")?;
        }
        self.platform.open_in_browser(&page)?;
        writeln!(out, "预览: {}", page.display())?;
        Ok(())
    }

    fn hints(&self, target: &Target, apply: bool, out: &mut dyn Write) -> Result<(), AppError> {
        let mut store = self.store();
        let (file, record) = self.resolve(&store, target)?;
        let suggestions = RegexScorerHints::new()?.suggest(&record.body);
        let roster = RegexRosterHints::new()?.suggest_roster(&record.body);

        if !roster.is_empty() {
            writeln!(out, "可能的出勤: {}", roster.join("、"))?;
        }
        if suggestions.is_empty() {
            writeln!(out, "{} 中没有识别到进球信息", file)?;
            return Ok(());
        }
        for suggestion in &suggestions {
            writeln!(out, "{}' {}", suggestion.minute, suggestion.name)?;
        }
        if apply {
            let updated = apply_suggestions(&record, &suggestions);
            store.save_file(&file, &updated)?;
            writeln!(out, "已写入 {}", file)?;
        }
        Ok(())
    }

    fn draft(&self, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), AppError> {
        let mut store = self.store();
        let hints = RegexScorerHints::new()?;
        let roster_hints = RegexRosterHints::new()?;
        let mut session = MatchSession::new(self.config.footer.clone(), self.builder());
        writeln!(out, "{}", HELP)?;

        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let Some(command) = DraftCommand::parse(&line) else {
                continue;
            };

            let result = match command {
                DraftCommand::New { opponent, date } => {
                    let date = date.unwrap_or_else(today);
                    session
                        .start(&date, &opponent)
                        .map(|_| format!("开始记录 {} {}", date, opponent))
                }
                DraftCommand::Text(text) => session.append_text(&text).map(|_| "已记录".to_string()),
                DraftCommand::Photo { filename, caption } => session
                    .add_photo(&filename, &caption)
                    .map(|added| (if added { "已添加照片" } else { "照片已存在" }).to_string()),
                DraftCommand::Info(patch) => session.update_info(patch).map(|_| "已更新".to_string()),
                DraftCommand::Status => Ok(status_line(&session)),
                DraftCommand::Hints => Ok(match session.draft() {
                    Some(draft) => {
                        let text = draft.paragraphs.join("\n");
                        let mut lines: Vec<String> = hints
                            .suggest(&text)
                            .iter()
                            .map(|s| format!("{}' {}", s.minute, s.name))
                            .collect();
                        let roster = roster_hints.suggest_roster(&text);
                        if !roster.is_empty() {
                            lines.push(format!("可能的出勤: {}", roster.join("、")));
                        }
                        lines.join("\n")
                    }
                    None => String::new(),
                }),
                DraftCommand::Cancel => session.cancel().map(|_| "已取消".to_string()),
                DraftCommand::Finish { overwrite } => match session.finish(&mut store, overwrite) {
                    Ok(file) => {
                        session = MatchSession::new(self.config.footer.clone(), self.builder());
                        Ok(format!("已保存 {}", store.path_of(&file).display()))
                    }
                    Err(err) => Err(err),
                },
                DraftCommand::Help => Ok(HELP.to_string()),
                DraftCommand::Unknown(command) => Ok(format!("未知命令 {}，发送 /help 查看帮助", command)),
                DraftCommand::Invalid { command, usage } => Ok(format!("{} 用法: {}", command, usage)),
            };

            match result {
                Ok(message) if message.is_empty() => {}
                Ok(message) => writeln!(out, "{}", message)?,
                Err(err) => {
                    warn!(error = %err, "Draft command rejected");
                    writeln!(out, "错误: {}", err)?;
                }
            }
        }

        if session.state() == SessionState::Drafting {
            info!("Input closed with an unsaved draft");
            writeln!(out, "输入结束，未保存的战报已丢弃")?;
        }
        Ok(())
    }
}

fn status_line(session: &MatchSession) -> String {
    match session.draft() {
        Some(draft) => format!(
            "{} {} | 地点: {} | 比分: {} | MVP: {} | {} 段文字 | {} 张照片",
            draft.date,
            draft.opponent,
            draft.info.location.as_deref().unwrap_or("未设置"),
            draft.info.score.as_deref().unwrap_or("未设置"),
            draft.info.mvp.as_deref().unwrap_or("未设置"),
            draft.paragraphs.len(),
            draft.photos.len()
        ),
        None => format!("当前没有进行中的战报 ({})", session.state()),
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
