// src/view/mod.rs
//! Client-side page data flow: snapshot refresh and image liveness.

mod images;
mod latch;
mod page_view;

pub use images::{check_images, HttpImageValidator, ImageValidator};
pub use latch::ExpiredImageFlag;
pub use page_view::{PageView, ViewState};
