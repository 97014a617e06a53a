/// Writes record files the way an operator's editor would, so tests cover
/// hand-edited shapes as well as codec output.
pub struct RecordFileBuilder {
    date: String,
    opponent: String,
    score: Option<String>,
    mvp: Option<String>,
    attendance: Vec<String>,
    photos: Vec<String>,
    body: String,
}

#[allow(dead_code)]
impl RecordFileBuilder {
    pub fn new(date: &str, opponent: &str) -> Self {
        Self {
            date: date.to_string(),
            opponent: opponent.to_string(),
            score: None,
            mvp: None,
            attendance: vec![],
            photos: vec![],
            body: "\n比赛详情\n".to_string(),
        }
    }

    pub fn score(mut self, score: &str) -> Self {
        self.score = Some(score.to_string());
        self
    }

    pub fn mvp(mut self, mvp: &str) -> Self {
        self.mvp = Some(mvp.to_string());
        self
    }

    pub fn attendance(mut self, names: &[&str]) -> Self {
        self.attendance = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Bare-string photo entries, as older records have them
    pub fn photo_paths(mut self, paths: &[&str]) -> Self {
        self.photos = paths.iter().map(|path| path.to_string()).collect();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn file_name(&self) -> String {
        format!("{}-{}.md", self.date, self.opponent)
    }

    pub fn render(self) -> (String, String) {
        let mut text = String::from("---\n");
        text.push_str(&format!("title: \"{} {}\"\n", self.date, self.opponent));
        text.push_str(&format!("date: \"{}\"\n", self.date));
        text.push_str(&format!("opponent: \"{}\"\n", self.opponent));
        if let Some(score) = &self.score {
            text.push_str(&format!("score: \"{}\"\n", score));
        }
        if let Some(mvp) = &self.mvp {
            text.push_str(&format!("mvp: \"{}\"\n", mvp));
        }
        text.push_str(&list("attendance", &self.attendance));
        text.push_str(&list("photos", &self.photos));
        text.push_str("---\n");
        text.push_str(&self.body);
        (self.file_name(), text)
    }
}

fn list(key: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("{}: []\n", key);
    }
    let mut out = format!("{}:\n", key);
    for item in items {
        out.push_str(&format!("  - \"{}\"\n", item));
    }
    out
}
