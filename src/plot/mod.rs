pub mod combined;

pub use combined::render_combined;
