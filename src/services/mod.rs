pub mod rating_stats;
