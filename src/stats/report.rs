use std::fmt::Write;

use super::{RankEntry, StatsSnapshot};

const RULE_WIDTH: usize = 60;
const RECENT_MATCHES: usize = 5;
const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Human-readable stats report, the content of `stats/stats.md`
pub fn render_markdown(snapshot: &StatsSnapshot, club_name: &str) -> String {
    let stats = &snapshot.stats;
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out);
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "        {club_name} 数据统计");
    let _ = writeln!(out, "{heavy}\n");
    let _ = writeln!(out, "📊 总比赛场次: {}\n", stats.total_matches);

    if !snapshot.rankings.mvp.is_empty() {
        let _ = writeln!(out, "⭐ MVP排行榜");
        let _ = writeln!(out, "{light}");
        let _ = writeln!(out, "排名  球员          MVP次数");
        let _ = writeln!(out, "{light}");
        for (index, entry) in snapshot.rankings.mvp.iter().enumerate() {
            let rate = rate(entry, stats.total_matches);
            let _ = writeln!(
                out,
                "{}  {:<12}  {}次      ({rate:.1}%)",
                rank_label(index),
                entry.player,
                entry.count
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "🏃 出勤排行榜");
    let _ = writeln!(out, "{light}");
    let _ = writeln!(out, "排名  球员          出勤次数  出勤率");
    let _ = writeln!(out, "{light}");
    for (index, entry) in snapshot.rankings.attendance.iter().enumerate() {
        let rate = rate(entry, stats.total_matches);
        let _ = writeln!(
            out,
            "{}  {:<12}  {}次      {rate:.1}%",
            rank_label(index),
            entry.player,
            entry.count
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "📅 最近比赛记录");
    let _ = writeln!(out, "{light}");
    for (index, summary) in stats.matches.iter().take(RECENT_MATCHES).enumerate() {
        let mvp = summary
            .mvp
            .as_deref()
            .map(|name| format!(" (MVP: {name})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}. {} {} {}{}",
            index + 1,
            summary.date.as_deref().unwrap_or_default(),
            summary.opponent.as_deref().unwrap_or_default(),
            summary.score.as_deref().unwrap_or_default(),
            mvp
        );
    }
    let _ = writeln!(out, "{heavy}");

    out
}

fn rank_label(index: usize) -> String {
    match MEDALS.get(index) {
        Some(medal) => medal.to_string(),
        None => format!("{:>4}", format!("{}.", index + 1)),
    }
}

fn rate(entry: &RankEntry, total_matches: usize) -> f64 {
    if total_matches == 0 {
        return 0.0;
    }
    entry.count as f64 / total_matches as f64 * 100.0
}
