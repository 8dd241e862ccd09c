//! PDF table extraction
//!
//! Tables are found from glyph positions, not from the page text. Glyphs are
//! collected through a [`pdf_extract::OutputDev`], grouped into lines by
//! baseline and split into runs wherever the horizontal gap is wider than the
//! font size. A line with two or more runs opens a table and its runs fix the
//! column bounds; each following line is cut into cells against those bounds,
//! so a blank cell keeps its column. The table ends at a large vertical gap or
//! at a line whose text runs across a column gap.

use super::{CellValue, ExtractionError, HeaderStyle, RawRow};
use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use tracing::debug;

/// Horizontal gap, in font sizes, that separates two runs on a line
const COLUMN_GAP_EM: f64 = 1.0;

/// Horizontal gap, in font sizes, rendered as a space inside a run
const WORD_GAP_EM: f64 = 0.1;

/// Vertical distance, in line heights, beyond which a line no longer
/// continues the table above it. Leaves room for one blank row.
const MAX_ROW_GAP_EM: f64 = 4.5;

/// A detected table: rows of trimmed cell text, header first
pub type TextTable = Vec<Vec<String>>;

/// Text on one line with no column-sized gap inside it
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Left edge in page units
    pub x0: f64,
    /// Right edge in page units
    pub x1: f64,
    /// Trimmed text
    pub text: String,
}

/// Runs sharing a baseline, ordered left to right
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Baseline measured down from the top of the page
    pub y: f64,
    /// Largest font size on the line
    pub height: f64,
    /// Runs on the line
    pub runs: Vec<TextRun>,
}

/// Extract raw rows from every table on every page of a PDF payload
pub fn extract_rows(bytes: &[u8], headers: HeaderStyle) -> Result<Vec<RawRow>, ExtractionError> {
    let pages = page_lines(bytes)?;

    let mut rows = Vec::new();
    for (index, lines) in pages.iter().enumerate() {
        let tables = detect_tables(lines);
        debug!(
            page = index + 1,
            lines = lines.len(),
            tables = tables.len(),
            "Scanned PDF page"
        );
        for table in &tables {
            rows.extend(table_rows(table, headers));
        }
    }

    Ok(rows)
}

/// Lay out the text of every page as positioned lines
fn page_lines(bytes: &[u8]) -> Result<Vec<Vec<TextLine>>, OutputError> {
    let mut document = Document::load_mem(bytes)?;
    if document.is_encrypted() {
        document.decrypt("")?;
    }

    let mut collector = GlyphCollector::default();
    pdf_extract::output_doc(&document, &mut collector)?;

    Ok(collector.pages.into_iter().map(group_lines).collect())
}

/// Detect tables among the lines of a single page
pub fn detect_tables(lines: &[TextLine]) -> Vec<TextTable> {
    let mut tables = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let header = &lines[index];
        if header.runs.len() < 2 {
            index += 1;
            continue;
        }

        let layout = ColumnLayout::from_header(header);
        let mut table: TextTable = vec![header.runs.iter().map(|run| run.text.clone()).collect()];
        let mut previous = header;
        let mut next = index + 1;

        while let Some(line) = lines.get(next) {
            let row_gap = previous.height.max(line.height) * MAX_ROW_GAP_EM;
            if line.y - previous.y > row_gap || !layout.fits(line) {
                break;
            }
            table.push(layout.cells(line));
            previous = line;
            next += 1;
        }

        if table.len() >= 2 {
            tables.push(table);
            index = next;
        } else {
            index += 1;
        }
    }

    tables
}

/// Zip each data row of a table against its header
///
/// Tables with fewer than two rows are ignored. Rows shorter than the header
/// lose their trailing keys, longer rows lose their extra cells, and rows
/// whose values are all empty are dropped.
pub fn table_rows(table: &[Vec<String>], headers: HeaderStyle) -> Vec<RawRow> {
    let Some((header, data)) = table.split_first() else {
        return Vec::new();
    };
    if data.is_empty() {
        return Vec::new();
    }

    let columns: Vec<String> = header.iter().map(|cell| headers.apply(cell)).collect();

    data.iter()
        .filter_map(|cells| {
            let row: RawRow = columns
                .iter()
                .cloned()
                .zip(cells.iter().map(|cell| CellValue::Text(cell.clone())))
                .collect();
            if row.values().all(CellValue::is_empty) {
                None
            } else {
                Some(row)
            }
        })
        .collect()
}

/// Column bounds taken from a header line
struct ColumnLayout {
    /// Left and right edge of each header cell
    edges: Vec<(f64, f64)>,
    /// Split points between neighbouring columns
    bounds: Vec<f64>,
}

impl ColumnLayout {
    fn from_header(header: &TextLine) -> Self {
        let edges: Vec<(f64, f64)> = header.runs.iter().map(|run| (run.x0, run.x1)).collect();
        let bounds = edges
            .windows(2)
            .map(|pair| (pair[0].1 + pair[1].0) / 2.0)
            .collect();
        Self { edges, bounds }
    }

    /// False when a run covers the whole gap between two header cells
    fn fits(&self, line: &TextLine) -> bool {
        !line.runs.iter().any(|run| {
            self.edges
                .windows(2)
                .any(|pair| run.x0 < pair[0].1 && run.x1 > pair[1].0)
        })
    }

    fn column_of(&self, run: &TextRun) -> usize {
        self.bounds.iter().filter(|bound| run.x0 >= **bound).count()
    }

    /// One cell per column, empty where the line has no text
    fn cells(&self, line: &TextLine) -> Vec<String> {
        let mut cells = vec![String::new(); self.edges.len()];
        for run in &line.runs {
            let cell = &mut cells[self.column_of(run)];
            if !cell.is_empty() {
                cell.push(' ');
            }
            cell.push_str(&run.text);
        }
        cells
    }
}

/// A single glyph in page units, y measured down from the top
#[derive(Debug, Clone)]
struct Glyph {
    x: f64,
    y: f64,
    width: f64,
    size: f64,
    text: String,
}

/// Collects the glyphs of each page
#[derive(Default)]
struct GlyphCollector {
    page_top: f64,
    glyphs: Vec<Glyph>,
    pages: Vec<Vec<Glyph>>,
}

impl OutputDev for GlyphCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.page_top = media_box.ury;
        self.glyphs.clear();
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.pages.push(std::mem::take(&mut self.glyphs));
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        text: &str,
    ) -> Result<(), OutputError> {
        let size = font_size * (trm.m11 * trm.m22).abs().sqrt();
        self.glyphs.push(Glyph {
            x: trm.m31,
            y: self.page_top - trm.m32,
            width: width * size,
            size,
            text: text.to_string(),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Group a page's glyphs into lines of runs, top to bottom
fn group_lines(mut glyphs: Vec<Glyph>) -> Vec<TextLine> {
    glyphs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut clusters: Vec<Vec<Glyph>> = Vec::new();
    for glyph in glyphs {
        match clusters.last_mut() {
            Some(cluster) if same_baseline(cluster, &glyph) => cluster.push(glyph),
            _ => clusters.push(vec![glyph]),
        }
    }

    clusters
        .into_iter()
        .filter_map(|mut cluster| {
            cluster.sort_by(|a, b| a.x.total_cmp(&b.x));
            let y = cluster[0].y;
            let height = cluster.iter().map(|glyph| glyph.size).fold(0.0, f64::max);
            let runs = split_runs(&cluster);
            if runs.is_empty() {
                None
            } else {
                Some(TextLine { y, height, runs })
            }
        })
        .collect()
}

fn same_baseline(cluster: &[Glyph], glyph: &Glyph) -> bool {
    let first = &cluster[0];
    (glyph.y - first.y).abs() <= first.size.max(glyph.size) / 2.0
}

fn split_runs(glyphs: &[Glyph]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut current: Option<TextRun> = None;

    for glyph in glyphs {
        if let Some(run) = current.as_mut() {
            let gap = glyph.x - run.x1;
            if gap <= glyph.size * COLUMN_GAP_EM {
                if gap > glyph.size * WORD_GAP_EM && !run.text.ends_with(' ') {
                    run.text.push(' ');
                }
                run.text.push_str(&glyph.text);
                run.x1 = run.x1.max(glyph.x + glyph.width);
                continue;
            }
        }

        runs.extend(current.take());
        current = Some(TextRun {
            x0: glyph.x,
            x1: glyph.x + glyph.width,
            text: glyph.text.clone(),
        });
    }
    runs.extend(current);

    runs.into_iter()
        .filter_map(|run| {
            let text = run.text.trim();
            if text.is_empty() {
                None
            } else {
                Some(TextRun {
                    x0: run.x0,
                    x1: run.x1,
                    text: text.to_string(),
                })
            }
        })
        .collect()
}
