use ratatui::{
    style::Stylize,
    text::{Line, Span, Text},
};

/// One key binding line, e.g. `(↑) / (↓) to navigate`
#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<&'static str>,
    pub description: &'static str,
}

#[derive(Debug, Clone)]
pub struct UsageInfo {
    pub description: Option<&'static str>,
    pub lines: Vec<UsageInfoLine>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

impl UsageInfoLine {
    pub fn new(keys: &[&'static str], description: &'static str) -> Self {
        UsageInfoLine {
            keys: keys.to_vec(),
            description,
        }
    }

    fn to_line<'a>(&self) -> Line<'a> {
        let mut spans: Vec<Span> = Vec::with_capacity(self.keys.len() * 2 + 1);

        for (idx, key) in self.keys.iter().enumerate() {
            if idx > 0 {
                spans.push(" / ".into());
            }
            spans.push(Span::from(format!("({})", key)).bold());
        }
        spans.push(Span::from(format!(" {}", self.description)));

        Line::from(spans)
    }
}

pub fn usage_to_text<'a>(usage: &UsageInfo) -> Text<'a> {
    let description = usage.description.map(Line::from);
    let bindings = usage.lines.iter().map(UsageInfoLine::to_line);

    Text::from(description.into_iter().chain(bindings).collect::<Vec<_>>())
}
