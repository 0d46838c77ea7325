//! Dashboard pages

mod verify;

pub use verify::VerifyPage;
