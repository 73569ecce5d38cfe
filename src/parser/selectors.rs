//! CSS selectors for the scraped marketplace and video pages
//!
//! These target third-party markup that is neither versioned nor stable. When a
//! site changes its class names the matching scraper silently returns an empty
//! list, so keep these in one place and check them first when a section goes blank.

use lazy_static::lazy_static;
use scraper::Selector;

/// AliExpress wholesale search: product title anchors
pub const ALIEXPRESS_PRODUCT_TITLE: &str = "a.item-title";

/// Amazon movers & shakers: centered product name spans
pub const AMAZON_MOVERS_TITLE: &str = "span.zg-text-center-align";

/// TikTok tag page: video title headings
pub const TIKTOK_TAG_TITLE: &str = "h3.title";

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    static ref DEFAULT_SELECTORS: Vec<(&'static str, Selector)> = vec![
        (ALIEXPRESS_PRODUCT_TITLE, parse_selector!("a.item-title")),
        (AMAZON_MOVERS_TITLE, parse_selector!("span.zg-text-center-align")),
        (TIKTOK_TAG_TITLE, parse_selector!("h3.title")),
    ];
}

/// Look up a precompiled selector for one of the default selector strings
pub fn precompiled(selector: &str) -> Option<&'static Selector> {
    DEFAULT_SELECTORS
        .iter()
        .find(|(source, _)| *source == selector)
        .map(|(_, compiled)| compiled)
}
