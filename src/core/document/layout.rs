use super::metrics::text_width_mm;

/// Page geometry, in millimetres unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    /// Baseline of the first line, measured from the top edge
    pub first_baseline_mm: f64,
    pub line_height_mm: f64,
    pub font_size_pt: f64,
}

impl Default for PageLayout {
    /// A4 portrait, 20 mm margins, Helvetica 16pt on a 10 mm grid.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
            first_baseline_mm: 30.0,
            line_height_mm: 10.0,
            font_size_pt: 16.0,
        }
    }
}

impl PageLayout {
    pub fn text_width_mm(&self) -> f64 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Lines that fit before `y + line_height` would pass the bottom edge.
    pub fn lines_per_page(&self) -> usize {
        let mut y = self.first_baseline_mm;
        let mut count = 0;
        while y + self.line_height_mm <= self.page_height_mm {
            count += 1;
            y += self.line_height_mm;
        }
        count.max(1)
    }
}

/// One line placed on a page; `y_mm` is measured from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub y_mm: f64,
    pub text: String,
}

/// Greedy word wrap. Every `\n` starts a new line; empty paragraphs stay as
/// empty lines. Words wider than `max_width_mm` are broken between chars.
pub fn wrap_text(text: &str, max_width_mm: f64, font_size_pt: f64) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, font_size_pt) <= max_width_mm;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
                continue;
            }

            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        lines.push(current);
    }

    lines
}

/// Assign wrapped lines to pages on the fixed line grid.
pub fn paginate(lines: Vec<String>, layout: &PageLayout) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = layout.first_baseline_mm;

    for text in lines {
        if y + layout.line_height_mm > layout.page_height_mm {
            pages.push(Vec::new());
            y = layout.first_baseline_mm;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine { y_mm: y, text });
        }
        y += layout.line_height_mm;
    }

    pages
}
