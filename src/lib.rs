//! Vehicle recommender core: load enriched reviews, filter and rank them,
//! and have a language model write up the best matches.

pub mod config;
pub mod data;
pub mod recommend;
