//! Integration tests for the outline pipeline over a mock line source.

use pdfoutline::error::PageError;
use pdfoutline::extract::{ClusterLevelAssigner, HeadingCandidate, LevelAssigner, SizeRankAssigner};
use pdfoutline::model::{BBox, Document, FontRun, HeadingLevel, Line, PageLines};
use pdfoutline::render;
use pdfoutline::source::LineSource;
use pdfoutline::{JsonFormat, OutlinePipeline};

/// Mock line source for testing.
struct MockSource {
    pages: Vec<PageLines>,
    page_count: u32,
    broken: Vec<u32>,
}

impl MockSource {
    fn new(pages: Vec<PageLines>) -> Self {
        let page_count = pages.iter().map(|p| p.number + 1).max().unwrap_or(0);
        Self {
            pages,
            page_count,
            broken: Vec::new(),
        }
    }

    fn with_broken_page(mut self, index: u32) -> Self {
        self.broken.push(index);
        self.page_count = self.page_count.max(index + 1);
        self
    }
}

impl LineSource for MockSource {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_lines(&self, index: u32) -> Result<PageLines, PageError> {
        if self.broken.contains(&index) {
            return Err(PageError::MissingContent(index));
        }
        self.pages
            .iter()
            .find(|p| p.number == index)
            .cloned()
            .ok_or(PageError::MissingContent(index))
    }
}

fn line(text: &str, size: f32, bold: bool, y: f32, page: u32) -> Line {
    Line::new(text, size, bold, BBox::new(72.0, y, 272.0, y + size), page)
}

fn page(number: u32, lines: Vec<Line>) -> PageLines {
    let mut page = PageLines::new(number, 792.0);
    for l in lines {
        page.push(l);
    }
    page
}

#[test]
fn test_empty_source_yields_empty_artifact() {
    let source = MockSource::new(vec![]);
    let document = Document::from_source(&source);
    let outline = OutlinePipeline::new().run(&document);

    assert!(outline.is_empty());
    let json = render::to_json(&outline, JsonFormat::Compact).unwrap();
    assert_eq!(json, "{\"title\":\"\",\"outline\":[]}");
}

#[test]
fn test_end_to_end_single_heading() {
    // A centered large bold title, prose, one numbered section with prose.
    let source = MockSource::new(vec![page(
        0,
        vec![
            Line::new(
                "Project Charter",
                24.0,
                true,
                BBox::new(200.0, 72.0, 412.0, 96.0),
                0,
            ),
            line(
                "this charter describes the scope of the work.",
                11.0,
                false,
                120.0,
                0,
            ),
            line("1. Introduction", 14.0, true, 180.0, 0),
            line(
                "the introduction explains the goals of the charter.",
                11.0,
                false,
                210.0,
                0,
            ),
            line(
                "it also names the sponsors and the team.",
                11.0,
                false,
                225.0,
                0,
            ),
        ],
    )]);
    let document = Document::from_source(&source);
    let outline = OutlinePipeline::new().run(&document);

    assert_eq!(outline.title, "Project Charter");
    assert_eq!(outline.outline.len(), 1);
    assert_eq!(outline.outline[0].level, HeadingLevel::H1);
    assert_eq!(outline.outline[0].text, "1. Introduction");
    assert_eq!(outline.outline[0].page, 0);
}

#[test]
fn test_title_text_never_appears_as_heading() {
    // The title recurs on a later page in heading-sized type.
    let source = MockSource::new(vec![
        page(
            0,
            vec![
                line("Project Charter", 22.0, true, 72.0, 0),
                line(
                    "the scope is unchanged from the original draft.",
                    11.0,
                    false,
                    120.0,
                    0,
                ),
            ],
        ),
        page(
            1,
            vec![
                line("Project Charter", 16.0, true, 90.0, 1),
                line(
                    "the charter is restated for the appendix record.",
                    11.0,
                    false,
                    120.0,
                    1,
                ),
            ],
        ),
    ]);
    let document = Document::from_source(&source);
    let outline = OutlinePipeline::new().run(&document);

    assert_eq!(outline.title, "Project Charter");
    assert!(outline
        .outline
        .iter()
        .all(|e| !e.text.eq_ignore_ascii_case("Project Charter")));
    assert!(outline.outline.is_empty());
}

#[test]
fn test_repeated_heading_deduplicated() {
    let source = MockSource::new(vec![
        page(
            0,
            vec![
                line("Study Overview", 20.0, true, 72.0, 0),
                line("Methods", 15.0, true, 150.0, 0),
                line(
                    "the methods are described in terms of the cohort.",
                    11.0,
                    false,
                    180.0,
                    0,
                ),
                line(
                    "each method lists its data sources and caveats.",
                    11.0,
                    false,
                    195.0,
                    0,
                ),
            ],
        ),
        page(
            1,
            vec![
                line("Methods", 15.0, true, 90.0, 1),
                line(
                    "the replication methods mirror the original cohort.",
                    11.0,
                    false,
                    120.0,
                    1,
                ),
                line(
                    "results from both runs are compared in detail.",
                    11.0,
                    false,
                    135.0,
                    1,
                ),
            ],
        ),
    ]);
    let document = Document::from_source(&source);
    let outline = OutlinePipeline::new().run(&document);

    assert_eq!(outline.title, "Study Overview");
    // Case-insensitive dedup keeps only the first occurrence.
    assert_eq!(outline.outline.len(), 1);
    assert_eq!(outline.outline[0].text, "Methods");
    assert_eq!(outline.outline[0].page, 0);
}

#[test]
fn test_table_rows_suppressed_heading_kept() {
    let source = MockSource::new(vec![page(
        0,
        vec![
            line("Inventory Report", 20.0, true, 60.0, 0),
            line("Storage Policy", 15.0, true, 100.0, 0),
            line(
                "all inventory is counted at the end of each month.",
                11.0,
                false,
                130.0,
                0,
            ),
            line("1.", 11.0, false, 300.0, 0),
            Line::new(
                "Bolt Assembly",
                12.0,
                true,
                BBox::new(150.0, 301.0, 280.0, 313.0),
                0,
            ),
            line("2.", 11.0, false, 320.0, 0),
            Line::new(
                "Washer Pack",
                12.0,
                true,
                BBox::new(150.0, 321.0, 280.0, 333.0),
                0,
            ),
            line("3.", 11.0, false, 340.0, 0),
            Line::new(
                "Hex Nut Set",
                12.0,
                true,
                BBox::new(150.0, 341.0, 280.0, 353.0),
                0,
            ),
        ],
    )]);
    let document = Document::from_source(&source);
    let outline = OutlinePipeline::new().run(&document);

    assert_eq!(outline.title, "Inventory Report");
    let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Storage Policy"]);
}

#[test]
fn test_table_only_page_yields_no_headings() {
    let source = MockSource::new(vec![page(
        0,
        vec![
            line("1.", 11.0, false, 300.0, 0),
            Line::new(
                "Bolt Assembly",
                12.0,
                true,
                BBox::new(150.0, 301.0, 280.0, 313.0),
                0,
            ),
            line("2.", 11.0, false, 320.0, 0),
            Line::new(
                "Washer Pack",
                12.0,
                true,
                BBox::new(150.0, 321.0, 280.0, 333.0),
                0,
            ),
            line("3.", 11.0, false, 340.0, 0),
            Line::new(
                "Hex Nut Set",
                12.0,
                true,
                BBox::new(150.0, 341.0, 280.0, 353.0),
                0,
            ),
        ],
    )]);
    let document = Document::from_source(&source);
    let outline = OutlinePipeline::new().run(&document);

    // The largest line still wins the title, but every table cell is
    // suppressed and the serial markers fail the heading predicate.
    assert_eq!(outline.title, "Bolt Assembly");
    assert!(outline.outline.is_empty());
}

#[test]
fn test_broken_page_skipped_rest_extracted() {
    let source = MockSource::new(vec![
        page(
            0,
            vec![
                line("Project Charter", 24.0, true, 72.0, 0),
                line("1. Introduction", 16.0, true, 150.0, 0),
                line(
                    "This document establishes the scope and goals for the project.",
                    11.0,
                    false,
                    180.0,
                    0,
                ),
                line(
                    "It also lists the stakeholders and the planned milestones.",
                    11.0,
                    false,
                    195.0,
                    0,
                ),
                line("1.1 Background", 13.0, true, 240.0, 0),
                line(
                    "The project grew out of the quarterly planning review.",
                    11.0,
                    false,
                    270.0,
                    0,
                ),
            ],
        ),
        page(
            2,
            vec![
                line("2. Requirements", 16.0, true, 90.0, 2),
                line(
                    "Requirements were gathered from the engineering teams.",
                    11.0,
                    false,
                    120.0,
                    2,
                ),
                line(
                    "Each requirement is tracked in the shared backlog.",
                    11.0,
                    false,
                    135.0,
                    2,
                ),
            ],
        ),
    ])
    .with_broken_page(1);

    let document = Document::from_source(&source);
    assert_eq!(document.page_count, 3);
    assert_eq!(document.line_count(), 9);

    let outline = OutlinePipeline::new().run(&document);
    assert_eq!(outline.title, "Project Charter");
    let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["1. Introduction", "1.1 Background", "2. Requirements"]
    );
    assert_eq!(outline.outline[2].page, 2);
}

#[test]
fn test_idempotent_output() {
    let source = MockSource::new(vec![page(
        0,
        vec![
            line("Annual Review", 20.0, true, 60.0, 0),
            line("Overview", 16.0, true, 120.0, 0),
            line(
                "the overview covers revenue and headcount for the year.",
                11.0,
                false,
                150.0,
                0,
            ),
            line(
                "each region reports its own figures in this section.",
                11.0,
                false,
                165.0,
                0,
            ),
        ],
    )]);

    let pipeline = OutlinePipeline::new();
    let first = pipeline.run(&Document::from_source(&source));
    let second = pipeline.run(&Document::from_source(&source));

    let first_json = render::to_json(&first, JsonFormat::Compact).unwrap();
    let second_json = render::to_json(&second, JsonFormat::Compact).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_size_rank_assigner_levels() {
    let source = MockSource::new(vec![page(
        0,
        vec![
            line("Annual Review", 20.0, true, 60.0, 0),
            line("Overview", 16.0, true, 120.0, 0),
            line(
                "the overview covers revenue and headcount for the year.",
                11.0,
                false,
                150.0,
                0,
            ),
            line(
                "each region reports its own figures in this section.",
                11.0,
                false,
                165.0,
                0,
            ),
            line("Findings", 13.0, true, 210.0, 0),
            line(
                "the findings point to steady growth in two regions.",
                11.0,
                false,
                240.0,
                0,
            ),
        ],
    )]);
    let document = Document::from_source(&source);
    let outline = OutlinePipeline::new()
        .with_level_assigner(Box::new(SizeRankAssigner))
        .run(&document);

    assert_eq!(outline.title, "Annual Review");
    let level_of = |text: &str| {
        outline
            .outline
            .iter()
            .find(|e| e.text == text)
            .map(|e| e.level)
            .unwrap()
    };
    assert_eq!(level_of("Overview"), HeadingLevel::H1);
    assert_eq!(level_of("Findings"), HeadingLevel::H2);
}

fn candidate(text: &str, size: f32, gap: f32, score: i32, y: f32) -> HeadingCandidate {
    HeadingCandidate {
        text: text.to_string(),
        size,
        bold: true,
        bbox: BBox::new(72.0, y, 272.0, y + size),
        page: 0,
        runs: vec![FontRun::new(text, size, true)],
        score,
        vertical_gap: gap,
        size_ratio: size / 12.0,
    }
}

#[test]
fn test_cluster_level_means_monotonic() {
    let candidates = vec![
        candidate("Part One", 24.0, 50.0, 10, 100.0),
        candidate("Part Two", 24.0, 48.0, 10, 300.0),
        candidate("Section A", 16.0, 36.0, 8, 150.0),
        candidate("Section B", 16.0, 34.0, 8, 350.0),
        candidate("Detail A", 12.0, 24.0, 6, 200.0),
        candidate("Detail B", 12.0, 22.0, 6, 400.0),
    ];
    let levels = ClusterLevelAssigner.assign(&candidates);
    assert_eq!(levels.len(), candidates.len());

    // Mean font size must not increase with heading depth.
    let mut means = Vec::new();
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        let sizes: Vec<f32> = candidates
            .iter()
            .zip(&levels)
            .filter(|(_, assigned)| **assigned == level)
            .map(|(c, _)| c.size)
            .collect();
        if !sizes.is_empty() {
            means.push(sizes.iter().sum::<f32>() / sizes.len() as f32);
        }
    }
    assert_eq!(means.len(), 3);
    assert!(means.windows(2).all(|w| w[0] >= w[1]));
}
