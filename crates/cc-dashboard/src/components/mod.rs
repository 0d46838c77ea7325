//! Reusable components

mod claim_card;
mod error_banner;
mod nav;
mod report_card;

pub use claim_card::ClaimCard;
pub use error_banner::ErrorBanner;
pub use nav::Nav;
pub use report_card::ReportCard;
