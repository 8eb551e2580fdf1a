//! Receipt layout: positions every line of text on fixed-size pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.
//! Layout is a pure function of the record and company profile.

use crate::ShipmentRecord;

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 842.0;
/// Margin on every side.
pub const MARGIN: f32 = 50.0;
/// Width of the bold label column in the field block.
pub const LABEL_WIDTH: f32 = 150.0;

pub const HEADING_SIZE: f32 = 20.0;
pub const TITLE_SIZE: f32 = 14.0;
pub const BODY_SIZE: f32 = 11.0;

/// Baseline-to-baseline distance as a multiple of the font size.
const LEADING: f32 = 1.4;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Field block rows: label and record field, in print order.
pub const FIELD_ROWS: [(&str, &str); 10] = [
    ("User Name:", "userName"),
    ("Loading Date:", "loadingDate"),
    ("Phone Number:", "phone"),
    ("Tracking Number:", "trackingNumber"),
    ("Goods Description:", "goodsDescription"),
    ("Quantity:", "quantity"),
    ("CBM:", "cbm"),
    ("Rate per CBM:", "ratePerCbm"),
    ("Total Amount:", "totalAmount"),
    ("Container Number:", "containerNumber"),
];

/// Company details printed on every receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
    pub contact: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Pacific Bridge Logistics".to_string(),
            address: "Guangzhou, China | Lagos, Nigeria".to_string(),
            contact: "Tel: +86 20 0000 0000 | info@pacificbridge.example".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// One positioned piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    /// Baseline
    pub y: f32,
    pub size: f32,
    pub weight: FontWeight,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// A laid-out receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLayout {
    pub pages: Vec<Page>,
}

impl ReceiptLayout {
    /// All runs on all pages, in flow order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|page| page.runs.iter())
    }

    /// The text of every run, in flow order.
    pub fn lines(&self) -> Vec<&str> {
        self.runs().map(|run| run.text.as_str()).collect()
    }
}

/// Top-to-bottom flow with page breaks at the bottom margin.
struct Flow {
    pages: Vec<Page>,
    top: f32,
}

impl Flow {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            top: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Reserve one line of `size` and return its baseline.
    fn next_line(&mut self, size: f32) -> f32 {
        let leading = size * LEADING;
        if self.top - leading < MARGIN {
            self.pages.push(Page::default());
            self.top = PAGE_HEIGHT - MARGIN;
        }
        let baseline = self.top - size;
        self.top -= leading;
        baseline
    }

    fn blank(&mut self, size: f32) {
        self.top -= size * LEADING;
    }

    fn put(&mut self, x: f32, y: f32, size: f32, weight: FontWeight, text: String) {
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(TextRun {
                x,
                y,
                size,
                weight,
                text,
            });
        }
    }

    /// Write `text` at `x`, wrapping within `width`.
    fn paragraph(&mut self, x: f32, width: f32, size: f32, weight: FontWeight, text: &str) {
        for line in wrap(text, max_chars(width, size)) {
            let y = self.next_line(size);
            self.put(x, y, size, weight, line);
        }
    }

    /// Bold label and regular value on the same baseline; the value wraps
    /// inside its own column.
    fn field(&mut self, label: &str, value: &str) {
        let value_x = MARGIN + LABEL_WIDTH;
        let value_width = PAGE_WIDTH - MARGIN - value_x;
        let mut lines = wrap(value, max_chars(value_width, BODY_SIZE)).into_iter();

        let y = self.next_line(BODY_SIZE);
        self.put(MARGIN, y, BODY_SIZE, FontWeight::Bold, label.to_string());
        if let Some(first) = lines.next() {
            self.put(value_x, y, BODY_SIZE, FontWeight::Regular, first);
        }
        for line in lines {
            let y = self.next_line(BODY_SIZE);
            self.put(value_x, y, BODY_SIZE, FontWeight::Regular, line);
        }
    }
}

fn max_chars(width: f32, size: f32) -> usize {
    ((width / (size * AVG_GLYPH_WIDTH)).floor() as usize).max(1)
}

/// Greedy word wrap. Words longer than a line are split. Always returns at
/// least one line, so an empty value still occupies its row.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars && !text.contains('\n') {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if !current.is_empty() && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out a receipt for `record`.
pub fn layout(record: &ShipmentRecord, company: &CompanyProfile) -> ReceiptLayout {
    let width = PAGE_WIDTH - 2.0 * MARGIN;
    let mut flow = Flow::new();

    // Header
    flow.paragraph(MARGIN, width, HEADING_SIZE, FontWeight::Bold, &company.name);
    flow.blank(BODY_SIZE);
    flow.paragraph(
        MARGIN,
        width,
        TITLE_SIZE,
        FontWeight::Bold,
        &format!("Tracking Receipt: {}", record.tracking_number),
    );
    flow.paragraph(
        MARGIN,
        width,
        BODY_SIZE,
        FontWeight::Regular,
        &format!("Status: {}", record.text("status")),
    );
    flow.paragraph(
        MARGIN,
        width,
        BODY_SIZE,
        FontWeight::Regular,
        &format!(
            "Route: {} -> {}",
            record.text("origin"),
            record.text("destination")
        ),
    );
    flow.blank(BODY_SIZE);

    // Company block
    flow.paragraph(MARGIN, width, BODY_SIZE, FontWeight::Bold, &company.name);
    flow.paragraph(MARGIN, width, BODY_SIZE, FontWeight::Regular, &company.address);
    flow.paragraph(MARGIN, width, BODY_SIZE, FontWeight::Regular, &company.contact);
    flow.blank(BODY_SIZE);

    // Field block
    for (label, field) in FIELD_ROWS {
        flow.field(label, &record.text(field));
    }

    ReceiptLayout { pages: flow.pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ShipmentRecord {
        ShipmentRecord::new("TRK1")
            .with("status", "In Transit")
            .with("origin", "Shanghai")
            .with("destination", "Lagos")
            .with("userName", "Ada Obi")
            .with("quantity", 12)
            .with("cbm", 2.5)
    }

    #[test]
    fn header_and_company_block() {
        let company = CompanyProfile::default();
        let layout = layout(&record(), &company);
        let lines = layout.lines();

        assert_eq!(lines[0], company.name);
        assert_eq!(lines[1], "Tracking Receipt: TRK1");
        assert_eq!(lines[2], "Status: In Transit");
        assert_eq!(lines[3], "Route: Shanghai -> Lagos");
        assert_eq!(lines[4], company.name);
        assert_eq!(lines[5], company.address);
        assert_eq!(lines[6], company.contact);
    }

    #[test]
    fn field_rows_in_fixed_order() {
        let layout = layout(&record(), &CompanyProfile::default());
        let labels: Vec<_> = layout
            .runs()
            .filter(|run| run.x == MARGIN && run.text.ends_with(':'))
            .map(|run| run.text.as_str())
            .collect();

        let expected: Vec<_> = FIELD_ROWS.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn label_bold_value_regular_on_same_baseline() {
        let layout = layout(&record(), &CompanyProfile::default());
        let runs: Vec<_> = layout.runs().collect();
        let label = runs.iter().position(|r| r.text == "Quantity:").unwrap();

        assert_eq!(runs[label].weight, FontWeight::Bold);
        assert_eq!(runs[label + 1].text, "12");
        assert_eq!(runs[label + 1].weight, FontWeight::Regular);
        assert_eq!(runs[label + 1].y, runs[label].y);
        assert_eq!(runs[label + 1].x, MARGIN + LABEL_WIDTH);
    }

    #[test]
    fn missing_values_render_empty() {
        let layout = layout(&ShipmentRecord::new("TRK1"), &CompanyProfile::default());
        let lines = layout.lines();

        assert!(lines.contains(&"Status: "));
        assert!(lines.contains(&"Route:  -> "));
        assert!(!lines
            .iter()
            .any(|l| l.contains("undefined") || l.contains("null")));

        // Every label is still followed by its (empty) value.
        let runs: Vec<_> = layout.runs().collect();
        let label = runs.iter().position(|r| r.text == "Phone Number:").unwrap();
        assert_eq!(runs[label + 1].text, "");
    }

    #[test]
    fn long_values_wrap_in_value_column() {
        let description = "cartons of assorted kitchen equipment ".repeat(6);
        let record = record().with("goodsDescription", description.trim());
        let layout = layout(&record, &CompanyProfile::default());
        let runs: Vec<_> = layout.runs().collect();

        let label = runs
            .iter()
            .position(|r| r.text == "Goods Description:")
            .unwrap();
        let quantity = runs.iter().position(|r| r.text == "Quantity:").unwrap();
        let value_lines = &runs[label + 1..quantity];

        assert!(value_lines.len() > 1);
        assert!(value_lines.iter().all(|r| r.x == MARGIN + LABEL_WIDTH));
        let rejoined: Vec<_> = value_lines.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(rejoined.join(" "), description.trim());
    }

    #[test]
    fn overflow_starts_new_page() {
        let record = record().with("goodsDescription", "word ".repeat(2000));
        let layout = layout(&record, &CompanyProfile::default());

        assert!(layout.pages.len() > 1);
        for run in layout.runs() {
            assert!(run.y >= MARGIN, "run below margin: {:?}", run);
            assert!(run.y <= PAGE_HEIGHT - MARGIN);
        }
        // Remaining rows continue on the last page.
        let last = layout.pages.last().unwrap();
        assert!(last.runs.iter().any(|r| r.text == "Container Number:"));
    }

    #[test]
    fn single_page_for_typical_record() {
        let layout = layout(&record(), &CompanyProfile::default());
        assert_eq!(layout.pages.len(), 1);
    }

    #[test]
    fn wrap_behaviour() {
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("a b c", 10), vec!["a b c"]);
        assert_eq!(wrap("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_layout_deterministic(
                status in "[ -~]{0,40}",
                description in "[ -~]{0,400}",
            ) {
                let record = ShipmentRecord::new("TRK1")
                    .with("status", status)
                    .with("goodsDescription", description);
                let company = CompanyProfile::default();

                prop_assert_eq!(layout(&record, &company), layout(&record, &company));
            }

            #[test]
            fn prop_wrap_respects_width(text in "[a-z ]{0,200}", width in 1usize..40) {
                for line in wrap(&text, width) {
                    prop_assert!(line.chars().count() <= width);
                }
            }
        }
    }
}
