use crate::constants::{
    BASE_ORIGIN, COMPANY_LIST_URL, ECONOMY_LIST_URL, INDUSTRY_LIST_URL, INVEST_LIST_URL,
    MARKET_LIST_URL,
};
use crate::types::ReportRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

/// Where a row's category label comes from.
#[derive(Debug, Clone, Copy)]
pub enum CategorySource {
    Fixed(&'static str),
    Cell(usize),
}

/// Column layout of one listing page. The five research pages share the same
/// table markup but disagree on column order and count.
#[derive(Debug, Clone, Copy)]
pub struct RowSchema {
    pub list_url: &'static str,
    pub report_type: &'static str,
    pub min_cells: usize,
    pub category: CategorySource,
    pub title_cell: usize,
    pub company_cell: usize,
    pub date_cell: usize,
    /// Cell holding the stock-name link (company-analysis page only).
    pub stock_cell: Option<usize>,
    /// Cell that may carry a direct PDF link (company-analysis page only).
    pub pdf_cell: Option<usize>,
}

/// The five sources, in traversal order.
pub static SOURCES: [RowSchema; 5] = [
    RowSchema {
        list_url: INDUSTRY_LIST_URL,
        report_type: "산업분석 리포트",
        min_cells: 5,
        category: CategorySource::Cell(0),
        title_cell: 1,
        company_cell: 2,
        date_cell: 4,
        stock_cell: None,
        pdf_cell: None,
    },
    RowSchema {
        list_url: INVEST_LIST_URL,
        report_type: "투자정보 리포트",
        min_cells: 4,
        category: CategorySource::Fixed("투자정보"),
        title_cell: 0,
        company_cell: 1,
        date_cell: 3,
        stock_cell: None,
        pdf_cell: None,
    },
    RowSchema {
        list_url: MARKET_LIST_URL,
        report_type: "시황정보 리포트",
        min_cells: 4,
        category: CategorySource::Fixed("시황정보"),
        title_cell: 0,
        company_cell: 1,
        date_cell: 3,
        stock_cell: None,
        pdf_cell: None,
    },
    RowSchema {
        list_url: ECONOMY_LIST_URL,
        report_type: "경제분석 리포트",
        min_cells: 4,
        category: CategorySource::Fixed("경제분석"),
        title_cell: 0,
        company_cell: 1,
        date_cell: 3,
        stock_cell: None,
        pdf_cell: None,
    },
    RowSchema {
        list_url: COMPANY_LIST_URL,
        report_type: "종목분석 리포트",
        min_cells: 5,
        category: CategorySource::Fixed("종목분석"),
        title_cell: 1,
        company_cell: 2,
        date_cell: 4,
        stock_cell: Some(0),
        pdf_cell: Some(3),
    },
];

static TD_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Listing dates are two-digit-year dotted, e.g. `25.08.29`.
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{2}$").unwrap());

/// `25.08.29` -> `2025-08-29`. Anything else is not a report row (headers,
/// ads, pagination) and yields `None`.
pub fn normalize_date(raw: &str) -> Option<String> {
    if DATE_RE.is_match(raw) {
        Some(format!("20{}", raw.replace('.', "-")))
    } else {
        None
    }
}

/// Resolve an href against the site origin.
pub fn absolutize(href: &str) -> Option<String> {
    let base = Url::parse(BASE_ORIGIN).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn cell_link<'a>(cell: ElementRef<'a>) -> Option<ElementRef<'a>> {
    cell.select(&LINK_SELECTOR).next()
}

impl RowSchema {
    /// Map one `<tr>` to a partial record. `None` is the "not parseable"
    /// signal: short rows, rows whose title cell has no link, and rows with
    /// empty required fields all land here and are skipped by the collector,
    /// never raised.
    pub fn extract_row(&self, row: ElementRef) -> Option<ReportRecord> {
        let cells: Vec<ElementRef> = row.select(&TD_SELECTOR).collect();
        if cells.len() < self.min_cells {
            return None;
        }

        let title_link = cell_link(cells[self.title_cell])?;
        let title = cell_text(title_link);
        let detail_url = title_link.value().attr("href").and_then(absolutize)?;

        let company = cell_text(cells[self.company_cell]);
        if title.is_empty() || company.is_empty() {
            return None;
        }

        let category = match self.category {
            CategorySource::Fixed(label) => label.to_string(),
            CategorySource::Cell(index) => cell_text(cells[index]),
        };

        let stock_name = match self.stock_cell {
            Some(index) => {
                let stock = cell_text(cell_link(cells[index])?);
                if stock.is_empty() {
                    return None;
                }
                Some(stock)
            }
            None => None,
        };

        // Absence of the attachment link is fine, not a parse failure.
        let list_pdf_url = self
            .pdf_cell
            .and_then(|index| cell_link(cells[index]))
            .and_then(|link| link.value().attr("href"))
            .and_then(absolutize);

        Some(ReportRecord {
            category,
            title,
            company,
            stock_name,
            raw_date: cell_text(cells[self.date_cell]),
            normalized_date: None,
            detail_url,
            list_pdf_url,
            report_type: self.report_type.to_string(),
            summary: None,
            pdf_url: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_row(schema: &RowSchema, row_html: &str) -> Option<ReportRecord> {
        let document = Html::parse_fragment(&format!("<table>{row_html}</table>"));
        let row_selector = Selector::parse("tr").unwrap();
        let row = document.select(&row_selector).next().unwrap();
        schema.extract_row(row)
    }

    fn industry() -> &'static RowSchema {
        &SOURCES[0]
    }

    fn economy() -> &'static RowSchema {
        &SOURCES[3]
    }

    fn company() -> &'static RowSchema {
        &SOURCES[4]
    }

    #[test]
    fn normalize_date_valid() {
        assert_eq!(normalize_date("25.08.29"), Some("2025-08-29".to_string()));
        assert_eq!(normalize_date("24.01.02"), Some("2024-01-02".to_string()));
    }

    #[test]
    fn normalize_date_rejects_other_shapes() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("2025.08.29"), None);
        assert_eq!(normalize_date("25-08-29"), None);
        assert_eq!(normalize_date("다음"), None);
        assert_eq!(normalize_date("25.08.29 오전"), None);
    }

    #[test]
    fn industry_row_extracts_all_fields() {
        let record = first_row(
            industry(),
            r#"<tr>
                <td> 반도체 </td>
                <td><a href="/research/industry_read.naver?nid=100"> 메모리 업황 점검 </a></td>
                <td> 한국투자증권 </td>
                <td>첨부</td>
                <td>25.08.29</td>
                <td>1234</td>
            </tr>"#,
        )
        .unwrap();

        assert_eq!(record.category, "반도체");
        assert_eq!(record.title, "메모리 업황 점검");
        assert_eq!(record.company, "한국투자증권");
        assert_eq!(record.raw_date, "25.08.29");
        assert_eq!(
            record.detail_url,
            "https://finance.naver.com/research/industry_read.naver?nid=100"
        );
        assert_eq!(record.report_type, "산업분석 리포트");
        assert!(record.stock_name.is_none());
        assert!(record.list_pdf_url.is_none());
        assert!(record.normalized_date.is_none());
    }

    #[test]
    fn economy_row_uses_fixed_category() {
        let record = first_row(
            economy(),
            r#"<tr>
                <td><a href="/research/economy_read.naver?nid=7">금리 전망</a></td>
                <td>NH투자증권</td>
                <td>첨부</td>
                <td>25.08.29</td>
            </tr>"#,
        )
        .unwrap();

        assert_eq!(record.category, "경제분석");
        assert_eq!(record.report_type, "경제분석 리포트");
        assert_eq!(record.company, "NH투자증권");
    }

    #[test]
    fn company_row_picks_up_stock_and_listing_pdf() {
        let record = first_row(
            company(),
            r#"<tr>
                <td><a href="/item/main.naver?code=005930">삼성전자</a></td>
                <td><a href="/research/company_read.naver?nid=55">실적 리뷰</a></td>
                <td>미래에셋증권</td>
                <td><a href="https://stock.pstatic.net/stock-research/company/55.pdf">pdf</a></td>
                <td>25.08.29</td>
            </tr>"#,
        )
        .unwrap();

        assert_eq!(record.stock_name.as_deref(), Some("삼성전자"));
        assert_eq!(
            record.list_pdf_url.as_deref(),
            Some("https://stock.pstatic.net/stock-research/company/55.pdf")
        );
        assert_eq!(record.category, "종목분석");
    }

    #[test]
    fn company_row_without_attachment_still_parses() {
        let record = first_row(
            company(),
            r#"<tr>
                <td><a href="/item/main.naver?code=005930">삼성전자</a></td>
                <td><a href="/research/company_read.naver?nid=56">목표가 상향</a></td>
                <td>미래에셋증권</td>
                <td></td>
                <td>25.08.29</td>
            </tr>"#,
        )
        .unwrap();

        assert!(record.list_pdf_url.is_none());
    }

    #[test]
    fn short_rows_are_not_parseable() {
        // Section header row: a single th, no tds
        assert!(first_row(economy(), "<tr><th>제목</th></tr>").is_none());
        // Spacer row with too few cells
        assert!(first_row(economy(), r#"<tr><td colspan="4"></td></tr>"#).is_none());
        assert!(first_row(
            industry(),
            "<tr><td>a</td><td>b</td><td>c</td><td>d</td></tr>"
        )
        .is_none());
    }

    #[test]
    fn row_without_title_link_is_not_parseable() {
        assert!(first_row(
            economy(),
            "<tr><td>제목만 있음</td><td>NH투자증권</td><td></td><td>25.08.29</td></tr>"
        )
        .is_none());
    }

    #[test]
    fn fields_are_trimmed() {
        let record = first_row(
            economy(),
            r#"<tr>
                <td><a href="/research/economy_read.naver?nid=8">  환율 점검  </a></td>
                <td>  삼성증권  </td>
                <td></td>
                <td>  25.08.29  </td>
            </tr>"#,
        )
        .unwrap();

        assert_eq!(record.title, "환율 점검");
        assert_eq!(record.company, "삼성증권");
        assert_eq!(record.raw_date, "25.08.29");
    }

    #[test]
    fn absolutize_resolves_relative_and_keeps_absolute() {
        assert_eq!(
            absolutize("/research/company_read.naver?nid=1").as_deref(),
            Some("https://finance.naver.com/research/company_read.naver?nid=1")
        );
        assert_eq!(
            absolutize("https://stock.pstatic.net/a.pdf").as_deref(),
            Some("https://stock.pstatic.net/a.pdf")
        );
    }
}
