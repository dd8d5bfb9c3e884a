pub mod footnotes;

pub use footnotes::apply_footnotes;
