/// A single line of customer feedback, the unit of work for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// 1-based line number in the input file.
    pub line: usize,
    pub text: String,
}

impl Review {
    /// Builds a review from a raw input line. Returns `None` for lines that are blank
    /// after trimming.
    pub fn from_line(line: usize, raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            line,
            text: text.to_string(),
        })
    }

    /// Short, single-line preview used to identify the review in logs.
    pub fn preview(&self) -> String {
        const MAX_CHARS: usize = 60;
        if self.text.chars().count() <= MAX_CHARS {
            return self.text.clone();
        }
        let head: String = self.text.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}
