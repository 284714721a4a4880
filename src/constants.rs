//! Fixed endpoints, selectors and labels for the Naver Finance research pages.

pub const BASE_ORIGIN: &str = "https://finance.naver.com";

// The five research listing pages, first page only
pub const INDUSTRY_LIST_URL: &str = "https://finance.naver.com/research/industry_list.naver";
pub const INVEST_LIST_URL: &str = "https://finance.naver.com/research/invest_list.naver";
pub const MARKET_LIST_URL: &str = "https://finance.naver.com/research/market_info_list.naver";
pub const ECONOMY_LIST_URL: &str = "https://finance.naver.com/research/economy_list.naver";
pub const COMPANY_LIST_URL: &str = "https://finance.naver.com/research/company_list.naver";

/// Listing pages render their report rows inside a `type_1` table.
pub const LISTING_TABLE_SELECTOR: &str = "table.type_1";

/// Detail pages hold the report body inside a `view_cnt` block.
pub const DETAIL_CONTENT_SELECTOR: &str = "div.view_cnt";

/// Substituted when a detail page yields no readable summary.
pub const SUMMARY_FALLBACK: &str = "요약을 찾을 수 없습니다.";

/// Destination table in Airtable.
pub const AIRTABLE_TABLE_NAME: &str = "리포트 자료 추출";
