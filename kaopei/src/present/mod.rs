mod render;
mod view;

pub mod prelude {
    pub use super::render::{render_result, render_snapshot};
    pub use super::view::{
        ResultView, RoastLine, SnapshotCard, format_score, format_size, image_summary,
    };
}
