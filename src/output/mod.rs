pub mod formatter;

pub use formatter::{
    format_analysis, format_catalog_table, format_error, format_rating, format_recommendations,
    format_report, format_tsv, should_use_colors,
};
