use crate::record::InfoPatch;

/// One line of operator input while drafting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCommand {
    New {
        opponent: String,
        date: Option<String>,
    },
    Info(InfoPatch),
    Photo {
        filename: String,
        caption: String,
    },
    Status,
    Hints,
    Cancel,
    Finish {
        overwrite: bool,
    },
    Help,
    Text(String),
    Unknown(String),
    Invalid {
        command: String,
        usage: &'static str,
    },
}

pub const HELP: &str = "\
/new <对手名称> [YYYY-MM-DD]   创建新战报
/info <地点> <比分> <MVP>      设置比赛信息，用 - 跳过某项
/photo <文件名> [说明]          添加 photos/<日期>/ 下的照片
/status                        查看当前战报
/hints                         从正文推测进球信息
/cancel                        放弃当前战报
/finish [--force]              保存战报
其他文字会追加到正文";

impl DraftCommand {
    /// Blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(DraftCommand::Text(line.to_string()));
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let parsed = match command {
            "/new" => match args.as_slice() {
                [opponent] => DraftCommand::New {
                    opponent: opponent.to_string(),
                    date: None,
                },
                [opponent, date] => DraftCommand::New {
                    opponent: opponent.to_string(),
                    date: Some(date.to_string()),
                },
                _ => invalid(command, "/new <对手名称> [YYYY-MM-DD]"),
            },
            "/info" if !args.is_empty() && args.len() <= 3 => {
                let field = |index: usize| {
                    args.get(index)
                        .filter(|value| **value != "-")
                        .map(|value| value.to_string())
                };
                DraftCommand::Info(InfoPatch {
                    location: field(0),
                    score: field(1),
                    mvp: field(2),
                })
            }
            "/info" => invalid(command, "/info <地点> <比分> <MVP>"),
            "/photo" => match args.split_first() {
                Some((filename, caption)) => DraftCommand::Photo {
                    filename: filename.to_string(),
                    caption: caption.join(" "),
                },
                None => invalid(command, "/photo <文件名> [说明]"),
            },
            "/status" => DraftCommand::Status,
            "/hints" => DraftCommand::Hints,
            "/cancel" => DraftCommand::Cancel,
            "/finish" => DraftCommand::Finish {
                overwrite: args.contains(&"--force"),
            },
            "/help" => DraftCommand::Help,
            other => DraftCommand::Unknown(other.to_string()),
        };
        Some(parsed)
    }
}

fn invalid(command: &str, usage: &'static str) -> DraftCommand {
    DraftCommand::Invalid {
        command: command.to_string(),
        usage,
    }
}
